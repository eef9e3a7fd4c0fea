use std::time::Duration;

/// Session storage key marking that the intro already played in this tab.
pub const VISITED_KEY: &str = "hasVisited";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VideoSource {
    pub src: &'static str,
    pub mime: &'static str,
}

/// The runtime picks the first source it can decode.
pub const INTRO_SOURCES: &[VideoSource] = &[
    VideoSource {
        src: "/videos/logo_animation.webm",
        mime: "video/webm",
    },
    VideoSource {
        src: "/videos/logo_animation.mp4",
        mime: "video/mp4",
    },
];

/// Timing and progress constants for the first-visit intro.
#[derive(Clone, Debug, PartialEq)]
pub struct IntroConfig {
    pub session_key: &'static str,
    pub tick_interval: Duration,
    pub tick_step: u8,
    /// Simulated progress holds here until the video reports readiness.
    pub progress_cap: u8,
    pub load_timeout: Duration,
    pub fade_duration: Duration,
    pub sources: &'static [VideoSource],
}

impl Default for IntroConfig {
    fn default() -> Self {
        Self {
            session_key: VISITED_KEY,
            tick_interval: Duration::from_millis(100),
            tick_step: 10,
            progress_cap: 90,
            load_timeout: Duration::from_secs(5),
            fade_duration: Duration::from_millis(500),
            sources: INTRO_SOURCES,
        }
    }
}

/// gloo timers take milliseconds as `u32`.
pub fn millis(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}

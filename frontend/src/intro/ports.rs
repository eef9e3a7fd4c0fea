//! Seams between the intro controller and the runtime. Browser
//! implementations live in `browser.rs`; tests drive a simulated clock.
//! Every port reports back by dispatching an `IntroEvent`.

use std::time::Duration;

#[cfg_attr(test, mockall::automock)]
pub trait IntroTimers {
    /// Repeating; reports `Tick`.
    fn start_ticker(&mut self, every: Duration);
    fn stop_ticker(&mut self);
    /// One-shot; reports `WatchdogFired`.
    fn start_watchdog(&mut self, after: Duration);
    fn stop_watchdog(&mut self);
    /// One-shot; reports `FadeFinished` once the overlay is transparent.
    fn start_fade(&mut self, over: Duration);
    fn stop_fade(&mut self);
}

#[cfg_attr(test, mockall::automock)]
pub trait IntroMedia {
    /// Begin buffering. Reports `MediaReady`, `MediaFailed` and later `MediaEnded`.
    fn load(&mut self);
    /// Reports `PlaybackStarted` or `PlaybackRejected`.
    fn play(&mut self);
    /// Detach every listener. No media event may be reported afterwards.
    fn release(&mut self);
}

#[cfg_attr(test, mockall::automock)]
pub trait GestureGate {
    /// Listen for a single tap or click on the overlay; reports `Gesture`.
    fn arm(&mut self);
    fn disarm(&mut self);
}

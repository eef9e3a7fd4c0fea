//! The first-visit intro as an explicit state machine.
//!
//! [`transition`] is pure: it takes the current [`Sequencer`] and one
//! [`IntroEvent`] and returns the next state plus the [`Effect`]s the caller
//! must apply to timers, media and listeners. Cancellation effects are always
//! emitted before anything else, so a losing timer is gone before the winner's
//! mutations land.

use crate::config::IntroConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Ready,
    AwaitingGesture,
    Playing,
    FadingOut,
    Done,
}

impl Phase {
    /// The overlay is in the render tree from `Loading` through `FadingOut`.
    pub fn shows_overlay(self) -> bool {
        matches!(
            self,
            Phase::Loading
                | Phase::Ready
                | Phase::AwaitingGesture
                | Phase::Playing
                | Phase::FadingOut
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntroEvent {
    SessionChecked { first_visit: bool },
    Tick,
    WatchdogFired,
    /// Enough is buffered to play through without stalling.
    MediaReady,
    MediaFailed,
    PlaybackStarted,
    PlaybackRejected,
    Gesture,
    MediaEnded,
    FadeFinished,
    Unmounted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    StartTicker,
    StopTicker,
    StartWatchdog,
    StopWatchdog,
    LoadMedia,
    Play,
    ArmGesture,
    DisarmGesture,
    StartFade,
    StopFade,
    Release,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sequencer {
    phase: Phase,
    progress: u8,
    awaiting_gesture: bool,
    video_loaded: bool,
    retry_pending: bool,
    ticker: bool,
    watchdog: bool,
    gesture_armed: bool,
    tick_step: u8,
    progress_cap: u8,
}

impl Sequencer {
    pub fn new(config: &IntroConfig) -> Self {
        Self {
            phase: Phase::Idle,
            progress: 0,
            awaiting_gesture: false,
            video_loaded: false,
            retry_pending: false,
            ticker: false,
            watchdog: false,
            gesture_armed: false,
            tick_step: config.tick_step,
            progress_cap: config.progress_cap.min(100),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn awaiting_gesture(&self) -> bool {
        self.awaiting_gesture
    }

    pub fn video_loaded(&self) -> bool {
        self.video_loaded
    }

    pub fn shows_overlay(&self) -> bool {
        self.phase.shows_overlay()
    }

    pub fn ticker_live(&self) -> bool {
        self.ticker
    }

    pub fn watchdog_live(&self) -> bool {
        self.watchdog
    }

    pub fn gesture_armed(&self) -> bool {
        self.gesture_armed
    }

    /// Class names the page stylesheet may hook into. Nothing reads them back.
    pub fn style_hooks(&self) -> Vec<&'static str> {
        let mut hooks = Vec::new();
        if self.phase == Phase::Loading {
            hooks.push("loading");
        }
        if self.video_loaded {
            hooks.push("video-loaded");
        }
        if self.awaiting_gesture {
            hooks.push("awaiting-gesture");
        }
        if self.phase == Phase::FadingOut {
            hooks.push("fading-out");
        }
        hooks
    }

    fn stop_ticker(&mut self, effects: &mut Vec<Effect>) {
        if self.ticker {
            self.ticker = false;
            effects.push(Effect::StopTicker);
        }
    }

    fn stop_loading_timers(&mut self, effects: &mut Vec<Effect>) {
        self.stop_ticker(effects);
        if self.watchdog {
            self.watchdog = false;
            effects.push(Effect::StopWatchdog);
        }
    }

    fn disarm_gesture(&mut self, effects: &mut Vec<Effect>) {
        if self.gesture_armed {
            self.gesture_armed = false;
            effects.push(Effect::DisarmGesture);
        }
    }

    fn fade_out(&mut self, effects: &mut Vec<Effect>) {
        self.stop_loading_timers(effects);
        self.disarm_gesture(effects);
        self.retry_pending = false;
        self.awaiting_gesture = false;
        self.phase = Phase::FadingOut;
        effects.push(Effect::StartFade);
    }

    fn tear_down(&mut self, effects: &mut Vec<Effect>) {
        match self.phase {
            Phase::Done => {}
            Phase::Idle => self.phase = Phase::Done,
            phase => {
                self.stop_loading_timers(effects);
                self.disarm_gesture(effects);
                if phase == Phase::FadingOut {
                    effects.push(Effect::StopFade);
                }
                effects.push(Effect::Release);
                self.retry_pending = false;
                self.awaiting_gesture = false;
                self.phase = Phase::Done;
            }
        }
    }
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new(&IntroConfig::default())
    }
}

/// Applies one event. Events that mean nothing in the current phase leave the
/// state untouched and produce no effects.
pub fn transition(mut state: Sequencer, event: IntroEvent) -> (Sequencer, Vec<Effect>) {
    let mut effects = Vec::new();

    match (state.phase, event) {
        (_, IntroEvent::Unmounted) => state.tear_down(&mut effects),

        (Phase::Idle, IntroEvent::SessionChecked { first_visit: false }) => {
            state.phase = Phase::Done;
        }
        (Phase::Idle, IntroEvent::SessionChecked { first_visit: true }) => {
            state.phase = Phase::Loading;
            state.progress = 0;
            state.ticker = true;
            state.watchdog = true;
            effects.extend([Effect::StartTicker, Effect::StartWatchdog, Effect::LoadMedia]);
        }

        (Phase::Loading, IntroEvent::Tick) if state.ticker => {
            state.progress = state
                .progress
                .saturating_add(state.tick_step)
                .min(state.progress_cap);
            if state.progress >= state.progress_cap {
                state.stop_ticker(&mut effects);
            }
        }
        (Phase::Loading, IntroEvent::MediaReady) => {
            state.stop_loading_timers(&mut effects);
            state.progress = 100;
            state.video_loaded = true;
            state.phase = Phase::Ready;
            effects.push(Effect::Play);
        }
        (Phase::Loading, IntroEvent::WatchdogFired) if state.watchdog => {
            state.fade_out(&mut effects);
        }
        (Phase::Loading, IntroEvent::MediaFailed) => state.fade_out(&mut effects),

        (Phase::Ready, IntroEvent::PlaybackStarted) => state.phase = Phase::Playing,
        (Phase::Ready, IntroEvent::PlaybackRejected) => {
            state.phase = Phase::AwaitingGesture;
            state.awaiting_gesture = true;
            state.gesture_armed = true;
            effects.push(Effect::ArmGesture);
        }

        (Phase::AwaitingGesture, IntroEvent::Gesture) if state.gesture_armed => {
            state.disarm_gesture(&mut effects);
            state.retry_pending = true;
            effects.push(Effect::Play);
        }
        (Phase::AwaitingGesture, IntroEvent::PlaybackStarted) if state.retry_pending => {
            state.retry_pending = false;
            state.awaiting_gesture = false;
            state.phase = Phase::Playing;
        }
        (Phase::AwaitingGesture, IntroEvent::PlaybackRejected) if state.retry_pending => {
            state.fade_out(&mut effects);
        }

        (Phase::Ready | Phase::AwaitingGesture | Phase::Playing, IntroEvent::MediaFailed) => {
            state.fade_out(&mut effects);
        }
        (Phase::Playing, IntroEvent::MediaEnded) => state.fade_out(&mut effects),

        (Phase::FadingOut, IntroEvent::FadeFinished) => {
            state.phase = Phase::Done;
            effects.push(Effect::Release);
        }

        _ => {}
    }

    (state, effects)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(events: &[IntroEvent]) -> (Sequencer, Vec<Phase>, Vec<Effect>) {
        let mut state = Sequencer::default();
        let mut phases = vec![state.phase()];
        let mut all_effects = Vec::new();
        for event in events {
            let (next, effects) = transition(state, *event);
            if next.phase() != state.phase() {
                phases.push(next.phase());
            }
            all_effects.extend(effects);
            state = next;
        }
        (state, phases, all_effects)
    }

    const FIRST: IntroEvent = IntroEvent::SessionChecked { first_visit: true };

    #[test]
    fn returning_visitor_short_circuits() {
        let (state, phases, effects) = run(&[IntroEvent::SessionChecked { first_visit: false }]);
        assert_eq!(phases, vec![Phase::Idle, Phase::Done]);
        assert!(effects.is_empty());
        assert!(!state.shows_overlay());
    }

    #[test]
    fn first_visit_starts_both_timers_and_buffering() {
        let (state, _, effects) = run(&[FIRST]);
        assert_eq!(state.phase(), Phase::Loading);
        assert_eq!(
            effects,
            vec![Effect::StartTicker, Effect::StartWatchdog, Effect::LoadMedia]
        );
        assert!(state.ticker_live() && state.watchdog_live());
        assert_eq!(state.style_hooks(), vec!["loading"]);
    }

    #[test]
    fn happy_path_visits_every_phase_but_gesture() {
        let (state, phases, _) = run(&[
            FIRST,
            IntroEvent::Tick,
            IntroEvent::MediaReady,
            IntroEvent::PlaybackStarted,
            IntroEvent::MediaEnded,
            IntroEvent::FadeFinished,
        ]);
        assert_eq!(
            phases,
            vec![
                Phase::Idle,
                Phase::Loading,
                Phase::Ready,
                Phase::Playing,
                Phase::FadingOut,
                Phase::Done
            ]
        );
        assert!(!state.shows_overlay());
    }

    #[test]
    fn ticks_cap_at_ninety_and_stop_the_ticker() {
        let mut state = transition(Sequencer::default(), FIRST).0;
        let mut last = state.progress();
        let mut stops = 0;
        for _ in 0..20 {
            let (next, effects) = transition(state, IntroEvent::Tick);
            assert!(next.progress() >= last);
            assert!(next.progress() <= 90);
            stops += effects.iter().filter(|e| **e == Effect::StopTicker).count();
            last = next.progress();
            state = next;
        }
        assert_eq!(state.progress(), 90);
        assert_eq!(stops, 1);
        assert!(!state.ticker_live());
    }

    #[test]
    fn readiness_cancels_timers_before_playing() {
        let (state, _) = transition(Sequencer::default(), FIRST);
        let (state, _) = transition(state, IntroEvent::Tick);
        let (state, effects) = transition(state, IntroEvent::MediaReady);
        assert_eq!(
            effects,
            vec![Effect::StopTicker, Effect::StopWatchdog, Effect::Play]
        );
        assert_eq!(state.progress(), 100);
        assert_eq!(state.style_hooks(), vec!["video-loaded"]);
    }

    #[test]
    fn late_watchdog_after_readiness_is_ignored() {
        let (state, _, _) = run(&[FIRST, IntroEvent::MediaReady]);
        let (after, effects) = transition(state, IntroEvent::WatchdogFired);
        assert_eq!(after, state);
        assert!(effects.is_empty());
    }

    #[test]
    fn watchdog_first_skips_straight_to_fade() {
        let (state, phases, effects) = run(&[
            FIRST,
            IntroEvent::Tick,
            IntroEvent::Tick,
            IntroEvent::WatchdogFired,
        ]);
        assert_eq!(phases, vec![Phase::Idle, Phase::Loading, Phase::FadingOut]);
        assert_eq!(state.progress(), 20);
        assert!(effects.ends_with(&[Effect::StopTicker, Effect::StopWatchdog, Effect::StartFade]));

        let (state, effects) = transition(state, IntroEvent::MediaReady);
        assert_eq!(state.phase(), Phase::FadingOut);
        assert!(effects.is_empty());
    }

    #[test]
    fn media_error_while_loading_fades_out() {
        let (state, phases, _) = run(&[FIRST, IntroEvent::MediaFailed, IntroEvent::FadeFinished]);
        assert_eq!(
            phases,
            vec![Phase::Idle, Phase::Loading, Phase::FadingOut, Phase::Done]
        );
        assert!(!state.video_loaded());
    }

    #[test]
    fn rejected_then_tap_plays() {
        let (state, phases, effects) = run(&[
            FIRST,
            IntroEvent::MediaReady,
            IntroEvent::PlaybackRejected,
            IntroEvent::Gesture,
            IntroEvent::PlaybackStarted,
        ]);
        assert_eq!(
            phases,
            vec![
                Phase::Idle,
                Phase::Loading,
                Phase::Ready,
                Phase::AwaitingGesture,
                Phase::Playing
            ]
        );
        assert!(!state.awaiting_gesture());
        assert_eq!(effects.iter().filter(|e| **e == Effect::ArmGesture).count(), 1);
        assert_eq!(effects.iter().filter(|e| **e == Effect::Play).count(), 2);
    }

    #[test]
    fn gesture_listener_is_single_shot() {
        let (state, _, _) = run(&[FIRST, IntroEvent::MediaReady, IntroEvent::PlaybackRejected]);
        assert!(state.awaiting_gesture());
        assert_eq!(state.style_hooks(), vec!["video-loaded", "awaiting-gesture"]);

        let (state, effects) = transition(state, IntroEvent::Gesture);
        assert_eq!(effects, vec![Effect::DisarmGesture, Effect::Play]);

        // touchend and click both land on touch devices
        let (state, effects) = transition(state, IntroEvent::Gesture);
        assert!(effects.is_empty());
        assert_eq!(state.phase(), Phase::AwaitingGesture);
    }

    #[test]
    fn second_rejection_abandons_the_intro() {
        let (state, phases, effects) = run(&[
            FIRST,
            IntroEvent::MediaReady,
            IntroEvent::PlaybackRejected,
            IntroEvent::Gesture,
            IntroEvent::PlaybackRejected,
        ]);
        assert_eq!(*phases.last().unwrap(), Phase::FadingOut);
        assert!(!state.awaiting_gesture());
        assert_eq!(effects.iter().filter(|e| **e == Effect::Play).count(), 2);
    }

    #[test]
    fn rejection_before_gesture_is_not_a_second_failure() {
        let (state, _, _) = run(&[FIRST, IntroEvent::MediaReady, IntroEvent::PlaybackRejected]);
        let (after, effects) = transition(state, IntroEvent::PlaybackRejected);
        assert_eq!(after.phase(), Phase::AwaitingGesture);
        assert!(effects.is_empty());
    }

    #[test]
    fn media_error_while_waiting_for_tap_disarms_listener() {
        let (state, _, _) = run(&[FIRST, IntroEvent::MediaReady, IntroEvent::PlaybackRejected]);
        let (state, effects) = transition(state, IntroEvent::MediaFailed);
        assert_eq!(effects, vec![Effect::DisarmGesture, Effect::StartFade]);
        assert!(!state.gesture_armed());
    }

    #[test]
    fn unmount_while_loading_cancels_everything() {
        let (state, _, _) = run(&[FIRST, IntroEvent::Tick]);
        let (state, effects) = transition(state, IntroEvent::Unmounted);
        assert_eq!(
            effects,
            vec![Effect::StopTicker, Effect::StopWatchdog, Effect::Release]
        );
        assert_eq!(state.phase(), Phase::Done);
        assert!(!state.ticker_live() && !state.watchdog_live());

        let (after, effects) = transition(state, IntroEvent::Tick);
        assert_eq!(after.progress(), state.progress());
        assert!(effects.is_empty());
    }

    #[test]
    fn unmount_mid_fade_stops_the_fade() {
        let (state, _, _) = run(&[FIRST, IntroEvent::WatchdogFired]);
        let (_, effects) = transition(state, IntroEvent::Unmounted);
        assert_eq!(effects, vec![Effect::StopFade, Effect::Release]);
    }

    #[test]
    fn done_ignores_everything() {
        let (state, _, _) = run(&[IntroEvent::SessionChecked { first_visit: false }]);
        for event in [
            FIRST,
            IntroEvent::Tick,
            IntroEvent::MediaReady,
            IntroEvent::Gesture,
            IntroEvent::FadeFinished,
            IntroEvent::Unmounted,
        ] {
            let (after, effects) = transition(state, event);
            assert_eq!(after, state);
            assert!(effects.is_empty());
        }
    }
}

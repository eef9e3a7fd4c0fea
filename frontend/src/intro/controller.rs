use crate::config::IntroConfig;
use crate::intro::machine::{transition, Effect, IntroEvent, Phase, Sequencer};
use crate::intro::ports::{GestureGate, IntroMedia, IntroTimers};
use crate::intro::session::{claim_first_visit, SessionStore};

/// Owns the sequencer state and the resources it drives. Every state change
/// goes through [`IntroController::dispatch`].
pub struct IntroController<S, T, M, G> {
    config: IntroConfig,
    session: S,
    timers: T,
    media: M,
    gesture: G,
    state: Sequencer,
}

impl<S, T, M, G> IntroController<S, T, M, G>
where
    S: SessionStore,
    T: IntroTimers,
    M: IntroMedia,
    G: GestureGate,
{
    pub fn new(config: IntroConfig, session: S, timers: T, media: M, gesture: G) -> Self {
        let state = Sequencer::new(&config);
        Self {
            config,
            session,
            timers,
            media,
            gesture,
            state,
        }
    }

    pub fn state(&self) -> &Sequencer {
        &self.state
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    /// Checks and claims the session flag, then leaves `Idle`. The flag is
    /// written before any timer or media work is started.
    pub fn mount(&mut self) -> Phase {
        if self.state.phase() != Phase::Idle {
            return self.state.phase();
        }
        let first_visit = claim_first_visit(&mut self.session, self.config.session_key);
        if !first_visit {
            log::debug!("Intro already shown this session, skipping");
        }
        self.dispatch(IntroEvent::SessionChecked { first_visit })
    }

    pub fn dispatch(&mut self, event: IntroEvent) -> Phase {
        let previous = self.state.phase();
        let (next, effects) = transition(self.state, event);
        self.state = next;

        if next.phase() != previous {
            match event {
                IntroEvent::WatchdogFired => {
                    log::info!("Intro video not ready in {:?}, skipping", self.config.load_timeout)
                }
                IntroEvent::MediaFailed => log::info!("Intro video failed to load, skipping"),
                IntroEvent::PlaybackRejected if next.phase() == Phase::FadingOut => {
                    log::info!("Intro playback rejected after tap, skipping")
                }
                _ => {}
            }
            log::debug!("Intro {:?} -> {:?} on {:?}", previous, next.phase(), event);
        }

        for effect in effects {
            self.apply(effect);
        }
        self.state.phase()
    }

    pub fn unmount(&mut self) {
        self.dispatch(IntroEvent::Unmounted);
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::StartTicker => self.timers.start_ticker(self.config.tick_interval),
            Effect::StopTicker => self.timers.stop_ticker(),
            Effect::StartWatchdog => self.timers.start_watchdog(self.config.load_timeout),
            Effect::StopWatchdog => self.timers.stop_watchdog(),
            Effect::LoadMedia => self.media.load(),
            Effect::Play => self.media.play(),
            Effect::ArmGesture => self.gesture.arm(),
            Effect::DisarmGesture => self.gesture.disarm(),
            Effect::StartFade => self.timers.start_fade(self.config.fade_duration),
            Effect::StopFade => self.timers.stop_fade(),
            Effect::Release => self.media.release(),
        }
    }
}

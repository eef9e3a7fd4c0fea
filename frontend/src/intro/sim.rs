//! Deterministic stand-ins for the intro ports, shared by the controller and
//! driver tests. Time only moves when a test calls [`SimClock::next_due`].

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use yew::Callback;

use crate::intro::machine::IntroEvent;
use crate::intro::ports::{GestureGate, IntroMedia, IntroTimers};
use crate::intro::session::{MemorySession, SessionStore};

#[derive(Clone, Default)]
pub(crate) struct SharedSession(pub(crate) Rc<RefCell<MemorySession>>);

impl SessionStore for SharedSession {
    fn get(&self, key: &str) -> Option<String> {
        self.0.borrow().get(key)
    }

    fn set(&mut self, key: &str, value: &str) {
        self.0.borrow_mut().set(key, value)
    }
}

#[derive(Default)]
pub(crate) struct ClockState {
    pub(crate) now: u64,
    pub(crate) ticker: Option<(u64, u64)>,
    pub(crate) watchdog: Option<u64>,
    pub(crate) fade: Option<u64>,
}

#[derive(Clone, Default)]
pub(crate) struct SimClock(pub(crate) Rc<RefCell<ClockState>>);

impl SimClock {
    pub(crate) fn now(&self) -> u64 {
        self.0.borrow().now
    }

    pub(crate) fn live(&self) -> usize {
        let clock = self.0.borrow();
        [clock.ticker.is_some(), clock.watchdog.is_some(), clock.fade.is_some()]
            .into_iter()
            .filter(|live| *live)
            .count()
    }

    /// Pops the earliest timer due at or before `until`, moving the clock to it.
    pub(crate) fn next_due(&self, until: u64) -> Option<IntroEvent> {
        let mut clock = self.0.borrow_mut();
        let due = [
            clock.watchdog.map(|at| (at, 0u8)),
            clock.fade.map(|at| (at, 1)),
            clock.ticker.map(|(at, _)| (at, 2)),
        ]
        .into_iter()
        .flatten()
        .filter(|(at, _)| *at <= until)
        .min()?;

        clock.now = due.0;
        Some(match due.1 {
            0 => {
                clock.watchdog = None;
                IntroEvent::WatchdogFired
            }
            1 => {
                clock.fade = None;
                IntroEvent::FadeFinished
            }
            _ => {
                if let Some((at, every)) = clock.ticker.as_mut() {
                    *at += *every;
                }
                IntroEvent::Tick
            }
        })
    }
}

fn ms(duration: Duration) -> u64 {
    duration.as_millis() as u64
}

impl IntroTimers for SimClock {
    fn start_ticker(&mut self, every: Duration) {
        let mut clock = self.0.borrow_mut();
        assert!(clock.ticker.is_none(), "ticker started twice");
        clock.ticker = Some((clock.now + ms(every), ms(every)));
    }

    fn stop_ticker(&mut self) {
        self.0.borrow_mut().ticker = None;
    }

    fn start_watchdog(&mut self, after: Duration) {
        let mut clock = self.0.borrow_mut();
        assert!(clock.watchdog.is_none(), "watchdog started twice");
        clock.watchdog = Some(clock.now + ms(after));
    }

    fn stop_watchdog(&mut self) {
        self.0.borrow_mut().watchdog = None;
    }

    fn start_fade(&mut self, over: Duration) {
        let mut clock = self.0.borrow_mut();
        clock.fade = Some(clock.now + ms(over));
    }

    fn stop_fade(&mut self) {
        self.0.borrow_mut().fade = None;
    }
}

/// Call counts plus events to report synchronously from inside `load` and
/// `play`, the way a failing DOM call does.
#[derive(Default)]
pub(crate) struct MediaLog {
    pub(crate) loads: usize,
    pub(crate) plays: usize,
    pub(crate) releases: usize,
    pub(crate) emit: Option<Callback<IntroEvent>>,
    pub(crate) on_load: Vec<IntroEvent>,
    pub(crate) on_play: Vec<IntroEvent>,
}

#[derive(Clone, Default)]
pub(crate) struct SimMedia(pub(crate) Rc<RefCell<MediaLog>>);

impl SimMedia {
    pub(crate) fn scripted(
        emit: Callback<IntroEvent>,
        on_load: Vec<IntroEvent>,
        on_play: Vec<IntroEvent>,
    ) -> Self {
        Self(Rc::new(RefCell::new(MediaLog {
            emit: Some(emit),
            on_load,
            on_play,
            ..MediaLog::default()
        })))
    }

    fn report(&self, events: Vec<IntroEvent>) {
        let emit = self.0.borrow().emit.clone();
        if let Some(emit) = emit {
            for event in events {
                emit.emit(event);
            }
        }
    }
}

impl IntroMedia for SimMedia {
    fn load(&mut self) {
        let events = {
            let mut log = self.0.borrow_mut();
            log.loads += 1;
            log.on_load.clone()
        };
        self.report(events);
    }

    fn play(&mut self) {
        let events = {
            let mut log = self.0.borrow_mut();
            log.plays += 1;
            log.on_play.clone()
        };
        self.report(events);
    }

    fn release(&mut self) {
        self.0.borrow_mut().releases += 1;
    }
}

/// Counts `(arms, disarms)`.
#[derive(Clone, Default)]
pub(crate) struct SimGesture(pub(crate) Rc<RefCell<(usize, usize)>>);

impl GestureGate for SimGesture {
    fn arm(&mut self) {
        self.0.borrow_mut().0 += 1;
    }

    fn disarm(&mut self) {
        self.0.borrow_mut().1 += 1;
    }
}

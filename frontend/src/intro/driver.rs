//! Glue between asynchronous callbacks and the controller.
//!
//! Ports report back through the [`IntroDriver::emitter`] callback, which may
//! fire while the controller is still applying effects (a failing `load`, a
//! `play` with no video, a gesture listener that cannot attach). Such events
//! are queued and drained in arrival order by the call already holding the
//! controller.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use yew::Callback;

use crate::intro::controller::IntroController;
use crate::intro::machine::{IntroEvent, Sequencer};
use crate::intro::ports::{GestureGate, IntroMedia, IntroTimers};
use crate::intro::session::SessionStore;

pub struct IntroDriver<S, T, M, G> {
    controller: RefCell<Option<IntroController<S, T, M, G>>>,
    pending: RefCell<VecDeque<IntroEvent>>,
    on_change: Callback<Sequencer>,
}

impl<S, T, M, G> IntroDriver<S, T, M, G>
where
    S: SessionStore + 'static,
    T: IntroTimers + 'static,
    M: IntroMedia + 'static,
    G: GestureGate + 'static,
{
    /// `on_change` fires at most once per outer call, with the settled state.
    pub fn new(on_change: Callback<Sequencer>) -> Rc<Self> {
        Rc::new(Self {
            controller: RefCell::new(None),
            pending: RefCell::new(VecDeque::new()),
            on_change,
        })
    }

    /// Callback for ports. Holds the driver weakly; events sent after the
    /// driver is gone are dropped.
    pub fn emitter(self: &Rc<Self>) -> Callback<IntroEvent> {
        let weak = Rc::downgrade(self);
        Callback::from(move |event: IntroEvent| {
            if let Some(driver) = weak.upgrade() {
                driver.dispatch(event);
            }
        })
    }

    pub fn install(&self, controller: IntroController<S, T, M, G>) {
        *self.controller.borrow_mut() = Some(controller);
    }

    pub fn mount(&self) {
        self.run(|controller| {
            controller.mount();
        });
    }

    pub fn dispatch(&self, event: IntroEvent) {
        self.pending.borrow_mut().push_back(event);
        self.run(|_| ());
    }

    /// Read access outside of a dispatch. `None` while busy or after unmount.
    pub fn inspect<R>(&self, f: impl FnOnce(&IntroController<S, T, M, G>) -> R) -> Option<R> {
        let slot = self.controller.try_borrow().ok()?;
        slot.as_ref().map(f)
    }

    /// Tears everything down without notifying; the component is going away.
    pub fn unmount(&self) {
        self.pending.borrow_mut().clear();
        let controller = match self.controller.try_borrow_mut() {
            Ok(mut slot) => slot.take(),
            Err(_) => {
                log::warn!("Intro unmounted while busy");
                None
            }
        };
        if let Some(mut controller) = controller {
            controller.unmount();
        }
    }

    fn run(&self, f: impl FnOnce(&mut IntroController<S, T, M, G>)) {
        // Already borrowed further up the stack: that call drains the queue.
        let Ok(mut slot) = self.controller.try_borrow_mut() else {
            return;
        };
        let Some(controller) = slot.as_mut() else {
            return;
        };

        let before = *controller.state();
        f(controller);
        while let Some(event) = self.next_pending() {
            controller.dispatch(event);
        }
        let after = *controller.state();
        drop(slot);

        if after != before {
            self.on_change.emit(after);
        }
    }

    fn next_pending(&self) -> Option<IntroEvent> {
        self.pending.borrow_mut().pop_front()
    }
}

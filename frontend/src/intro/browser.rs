//! DOM-backed ports for the intro controller.

use std::rc::Rc;
use std::time::Duration;

use gloo_timers::callback::{Interval, Timeout};
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{EventTarget, HtmlSourceElement, HtmlVideoElement};
use yew::{Callback, NodeRef};

use crate::config::{millis, IntroConfig, VideoSource};
use crate::intro::controller::IntroController;
use crate::intro::driver::IntroDriver;
use crate::intro::error::IntroError;
use crate::intro::machine::{IntroEvent, Sequencer};
use crate::intro::ports::{GestureGate, IntroMedia, IntroTimers};
use crate::intro::session::BrowserSession;

type Listener = Closure<dyn FnMut(web_sys::Event)>;

const GESTURE_EVENTS: [&str; 2] = ["click", "touchend"];

/// gloo timers cancel themselves on drop, so stopping is just forgetting.
///
/// Stopping often happens inside the timer's own callback (the ticker
/// reaching its cap, a tap disarming the gesture listener). Dropping a
/// `Closure` mid-call is sound because wasm-bindgen only frees it once the
/// running invocation returns, so every adapter here drops in place.
pub struct BrowserTimers {
    emit: Callback<IntroEvent>,
    ticker: Option<Interval>,
    watchdog: Option<Timeout>,
    fade: Option<Timeout>,
}

impl BrowserTimers {
    pub fn new(emit: Callback<IntroEvent>) -> Self {
        Self {
            emit,
            ticker: None,
            watchdog: None,
            fade: None,
        }
    }

    fn once(&self, after: Duration, event: IntroEvent) -> Timeout {
        let emit = self.emit.clone();
        Timeout::new(millis(after), move || emit.emit(event))
    }
}

impl IntroTimers for BrowserTimers {
    fn start_ticker(&mut self, every: Duration) {
        let emit = self.emit.clone();
        self.ticker = Some(Interval::new(millis(every), move || {
            emit.emit(IntroEvent::Tick)
        }));
    }

    fn stop_ticker(&mut self) {
        self.ticker = None;
    }

    fn start_watchdog(&mut self, after: Duration) {
        self.watchdog = Some(self.once(after, IntroEvent::WatchdogFired));
    }

    fn stop_watchdog(&mut self) {
        self.watchdog = None;
    }

    fn start_fade(&mut self, over: Duration) {
        self.fade = Some(self.once(over, IntroEvent::FadeFinished));
    }

    fn stop_fade(&mut self) {
        self.fade = None;
    }
}

/// The intro `<video>`. Created on first `load` so returning visitors never
/// pay for the element.
pub struct BrowserMedia {
    sources: &'static [VideoSource],
    emit: Callback<IntroEvent>,
    video: Option<HtmlVideoElement>,
    listeners: Vec<(EventTarget, &'static str, Listener)>,
}

impl BrowserMedia {
    pub fn new(sources: &'static [VideoSource], emit: Callback<IntroEvent>) -> Self {
        Self {
            sources,
            emit,
            video: None,
            listeners: Vec::new(),
        }
    }

    pub fn node(&self) -> Option<web_sys::Node> {
        self.video.clone().map(Into::into)
    }

    fn build(&mut self) -> Result<HtmlVideoElement, IntroError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or(IntroError::NoWindow)?;
        let video: HtmlVideoElement = document
            .create_element("video")
            .map_err(|e| IntroError::dom("createElement(video)", e))?
            .unchecked_into();

        video.set_class_name("intro-video");
        video.set_muted(true);
        video.set_default_muted(true);
        video.set_autoplay(false);
        video.set_preload("auto");
        // iOS and some embedded browsers only honor the attributes.
        for attr in ["muted", "playsinline", "webkit-playsinline", "x5-playsinline"] {
            video
                .set_attribute(attr, "true")
                .map_err(|e| IntroError::dom("setAttribute", e))?;
        }

        let mut last_source = None;
        for source in self.sources {
            let element: HtmlSourceElement = document
                .create_element("source")
                .map_err(|e| IntroError::dom("createElement(source)", e))?
                .unchecked_into();
            element.set_src(source.src);
            element.set_type(source.mime);
            video
                .append_child(&element)
                .map_err(|e| IntroError::dom("appendChild", e))?;
            last_source = Some(element);
        }

        self.listen(video.clone().into(), "canplaythrough", IntroEvent::MediaReady)?;
        self.listen(video.clone().into(), "ended", IntroEvent::MediaEnded)?;
        self.listen(video.clone().into(), "error", IntroEvent::MediaFailed)?;
        // With <source> children the element itself stays quiet; the last
        // source erroring means nothing was playable.
        match last_source {
            Some(source) => self.listen(source.into(), "error", IntroEvent::MediaFailed)?,
            None => return Err(IntroError::Dom {
                call: "source",
                detail: "no intro video sources configured".to_string(),
            }),
        }

        Ok(video)
    }

    fn listen(
        &mut self,
        target: EventTarget,
        kind: &'static str,
        event: IntroEvent,
    ) -> Result<(), IntroError> {
        let emit = self.emit.clone();
        let listener = Closure::<dyn FnMut(web_sys::Event)>::new(move |_: web_sys::Event| {
            emit.emit(event)
        });
        target
            .add_event_listener_with_callback(kind, listener.as_ref().unchecked_ref())
            .map_err(|e| IntroError::dom("addEventListener", e))?;
        self.listeners.push((target, kind, listener));
        Ok(())
    }
}

impl IntroMedia for BrowserMedia {
    fn load(&mut self) {
        if self.video.is_none() {
            match self.build() {
                Ok(video) => self.video = Some(video),
                Err(e) => {
                    log::warn!("Could not set up intro video: {}", e);
                    self.release();
                    self.emit.emit(IntroEvent::MediaFailed);
                    return;
                }
            }
        }
        if let Some(video) = &self.video {
            video.load();
        }
    }

    fn play(&mut self) {
        let Some(video) = &self.video else {
            self.emit.emit(IntroEvent::PlaybackRejected);
            return;
        };
        let emit = self.emit.clone();
        match video.play() {
            Ok(promise) => spawn_local(async move {
                match JsFuture::from(promise).await {
                    Ok(_) => emit.emit(IntroEvent::PlaybackStarted),
                    Err(e) => {
                        log::info!("Intro playback blocked: {:?}", e);
                        emit.emit(IntroEvent::PlaybackRejected)
                    }
                }
            }),
            Err(e) => {
                log::info!("Intro playback blocked: {:?}", e);
                emit.emit(IntroEvent::PlaybackRejected)
            }
        }
    }

    fn release(&mut self) {
        for (target, kind, listener) in self.listeners.drain(..) {
            let _ = target.remove_event_listener_with_callback(kind, listener.as_ref().unchecked_ref());
        }
        if let Some(video) = &self.video {
            let _ = video.pause();
        }
    }
}

impl Drop for BrowserMedia {
    fn drop(&mut self) {
        self.release();
    }
}

struct GestureListener {
    target: EventTarget,
    callback: Listener,
}

impl GestureListener {
    fn detach(&self) {
        for kind in GESTURE_EVENTS {
            let _ = self
                .target
                .remove_event_listener_with_callback(kind, self.callback.as_ref().unchecked_ref());
        }
    }
}

/// Single tap or click on the overlay.
pub struct BrowserGesture {
    overlay: NodeRef,
    emit: Callback<IntroEvent>,
    armed: Option<GestureListener>,
}

impl BrowserGesture {
    pub fn new(overlay: NodeRef, emit: Callback<IntroEvent>) -> Self {
        Self {
            overlay,
            emit,
            armed: None,
        }
    }

    fn target(&self) -> Result<EventTarget, IntroError> {
        if let Some(node) = self.overlay.get() {
            return Ok(node.into());
        }
        // Overlay not rendered yet; any tap on the page counts.
        web_sys::window()
            .and_then(|w| w.document())
            .map(Into::into)
            .ok_or(IntroError::NoWindow)
    }

    fn attach(&self) -> Result<GestureListener, IntroError> {
        let target = self.target()?;
        let emit = self.emit.clone();
        let fired = Rc::new(std::cell::Cell::new(false));
        let callback = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
            if fired.replace(true) {
                return;
            }
            event.prevent_default();
            event.stop_propagation();
            emit.emit(IntroEvent::Gesture);
        });
        for kind in GESTURE_EVENTS {
            target
                .add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())
                .map_err(|e| IntroError::dom("addEventListener", e))?;
        }
        Ok(GestureListener { target, callback })
    }
}

impl GestureGate for BrowserGesture {
    fn arm(&mut self) {
        if self.armed.is_some() {
            return;
        }
        match self.attach() {
            Ok(listener) => self.armed = Some(listener),
            Err(e) => {
                log::warn!("Could not listen for tap to play: {}", e);
                // Without a listener the overlay would never leave.
                self.emit.emit(IntroEvent::MediaFailed);
            }
        }
    }

    fn disarm(&mut self) {
        if let Some(listener) = self.armed.take() {
            listener.detach();
        }
    }
}

impl Drop for BrowserGesture {
    fn drop(&mut self) {
        self.disarm();
    }
}

pub type BrowserDriver = IntroDriver<BrowserSession, BrowserTimers, BrowserMedia, BrowserGesture>;

impl BrowserDriver {
    /// Wires DOM-backed ports to a fresh controller and mounts it.
    pub fn start(config: IntroConfig, overlay: NodeRef, on_change: Callback<Sequencer>) -> Rc<Self> {
        let driver = IntroDriver::new(on_change);
        let emit = driver.emitter();
        let controller = IntroController::new(
            config.clone(),
            BrowserSession::open(),
            BrowserTimers::new(emit.clone()),
            BrowserMedia::new(config.sources, emit.clone()),
            BrowserGesture::new(overlay, emit),
        );
        driver.install(controller);
        driver.mount();
        driver
    }

    pub fn video_node(&self) -> Option<web_sys::Node> {
        self.inspect(|controller| controller.media().node()).flatten()
    }
}

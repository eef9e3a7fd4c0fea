use std::rc::Rc;

use yew::prelude::*;
use yew::virtual_dom::VNode;

use crate::config::{millis, IntroConfig};
use crate::intro::browser::BrowserDriver;
use crate::intro::Sequencer;

const OVERLAY_CSS: &str = r#"
    .intro-overlay {
        position: fixed;
        inset: 0;
        z-index: 9999;
        background: #020D06;
        display: flex;
        flex-direction: column;
        align-items: center;
        justify-content: center;
        opacity: 1;
    }
    .intro-overlay.awaiting-gesture {
        cursor: pointer;
    }
    .intro-progress {
        width: 100%;
        max-width: 28rem;
        padding: 0 1.5rem;
        text-align: center;
        position: absolute;
    }
    .intro-progress h2 {
        font-size: 1.5rem;
        font-weight: 700;
        color: #fff;
        margin-bottom: 0.5rem;
    }
    .intro-progress p {
        color: #9ca3af;
        font-size: 0.875rem;
        margin-bottom: 1rem;
    }
    .intro-track {
        width: 100%;
        height: 0.5rem;
        background: #0A1B10;
        border-radius: 9999px;
        overflow: hidden;
    }
    .intro-fill {
        height: 100%;
        background: linear-gradient(to right, #03B044, #078236);
        transition: width 300ms ease-out;
    }
    .intro-percent {
        margin-top: 0.5rem;
        color: #03B044;
        font-weight: 600;
    }
    .intro-video {
        width: 100%;
        height: 100%;
        object-fit: cover;
        opacity: 0;
        transition: opacity 500ms;
    }
    .intro-overlay.video-loaded .intro-video {
        opacity: 1;
    }
    .intro-overlay.awaiting-gesture .intro-video {
        filter: brightness(0.5);
    }
    .intro-tap {
        position: absolute;
        inset: 0;
        display: flex;
        align-items: center;
        justify-content: center;
        z-index: 10;
        pointer-events: none;
        text-align: center;
        animation: intro-pulse 2s cubic-bezier(0.4, 0, 0.6, 1) infinite;
    }
    .intro-tap .ring {
        width: 5rem;
        height: 5rem;
        margin: 0 auto 1rem;
        border-radius: 9999px;
        border: 4px solid #03B044;
        display: flex;
        align-items: center;
        justify-content: center;
        color: #03B044;
    }
    .intro-tap strong {
        display: block;
        color: #fff;
        font-size: 1.125rem;
        margin-bottom: 0.5rem;
    }
    .intro-tap span {
        color: #9ca3af;
        font-size: 0.875rem;
    }
    @keyframes intro-pulse {
        50% { opacity: 0.5; }
    }
"#;

/// Full-viewport brand intro, shown once per browsing session. Renders
/// nothing for returning visitors and after the sequence completes.
#[function_component(LoadingAnimation)]
pub fn loading_animation() -> Html {
    let sequencer = use_state(Sequencer::default);
    let overlay_ref = use_node_ref();
    let driver = use_mut_ref(|| None::<Rc<BrowserDriver>>);
    let config = IntroConfig::default();
    let fade_ms = millis(config.fade_duration);

    {
        let sequencer = sequencer.clone();
        let overlay_ref = overlay_ref.clone();
        let driver = driver.clone();
        use_effect_with_deps(
            move |_| {
                let on_change = Callback::from(move |state: Sequencer| sequencer.set(state));
                let started = BrowserDriver::start(config, overlay_ref, on_change);
                *driver.borrow_mut() = Some(started);
                move || {
                    let started = driver.borrow_mut().take();
                    if let Some(started) = started {
                        started.unmount();
                    }
                }
            },
            (),
        );
    }

    let state = *sequencer;
    if !state.shows_overlay() {
        return html! {};
    }

    let video = driver.borrow().as_ref().and_then(|d| d.video_node());
    let progress = state.progress();
    let style = if state.style_hooks().contains(&"fading-out") {
        format!("opacity: 0; transition: opacity {}ms ease-in-out;", fade_ms)
    } else {
        String::new()
    };

    html! {
        <div ref={overlay_ref} class={classes!("intro-overlay", state.style_hooks())} style={style}>
            <style>{OVERLAY_CSS}</style>
            if !state.video_loaded() {
                <div class="intro-progress">
                    <h2>{"bijnis"}</h2>
                    <p>{"Loading..."}</p>
                    <div class="intro-track">
                        <div class="intro-fill" style={format!("width: {}%;", progress)}></div>
                    </div>
                    <div class="intro-percent">{format!("{}%", progress)}</div>
                </div>
            }
            if state.awaiting_gesture() && state.video_loaded() {
                <div class="intro-tap">
                    <div>
                        <div class="ring">
                            <svg width="32" height="32" fill="currentColor" viewBox="0 0 20 20">
                                <path d="M6.3 2.841A1.5 1.5 0 004 4.11V15.89a1.5 1.5 0 002.3 1.269l9.344-5.89a1.5 1.5 0 000-2.538L6.3 2.84z" />
                            </svg>
                        </div>
                        <strong>{"Tap to Play"}</strong>
                        <span>{"iOS playback restrictions detected"}</span>
                    </div>
                </div>
            }
            { video.map(VNode::VRef).unwrap_or_default() }
        </div>
    }
}

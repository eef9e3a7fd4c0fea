use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use web_sys::MediaQueryListEvent;
use yew::prelude::*;

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Tracks the OS "reduce motion" preference, including changes while the
/// page is open.
#[hook]
pub fn use_reduced_motion() -> bool {
    let reduced = use_state(|| false);

    {
        let reduced = reduced.clone();
        use_effect_with_deps(
            move |_| {
                let query = web_sys::window()
                    .and_then(|w| w.match_media(REDUCED_MOTION_QUERY).ok().flatten());
                let listener = query.map(|query| {
                    reduced.set(query.matches());
                    let callback = Closure::<dyn Fn(MediaQueryListEvent)>::new(
                        move |event: MediaQueryListEvent| reduced.set(event.matches()),
                    );
                    if let Err(e) = query
                        .add_event_listener_with_callback("change", callback.as_ref().unchecked_ref())
                    {
                        log::warn!("Failed to watch reduced motion preference: {:?}", e);
                    }
                    (query, callback)
                });
                move || {
                    if let Some((query, callback)) = listener {
                        let _ = query.remove_event_listener_with_callback(
                            "change",
                            callback.as_ref().unchecked_ref(),
                        );
                    }
                }
            },
            (),
        );
    }

    *reduced
}

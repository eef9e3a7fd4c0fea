use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use web_sys::Window;
use yew::prelude::*;

/// Fraction of the document scrolled, 0 when the page does not scroll.
pub fn scroll_fraction(scroll_y: f64, scroll_height: f64, viewport_height: f64) -> f64 {
    let scrollable = scroll_height - viewport_height;
    if scrollable <= 0.0 {
        return 0.0;
    }
    (scroll_y / scrollable).clamp(0.0, 1.0)
}

fn read_scroll_y(window: &Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}

fn read_progress(window: &Window) -> f64 {
    let scroll_height = window
        .document()
        .and_then(|d| d.document_element())
        .map(|e| e.scroll_height() as f64)
        .unwrap_or(0.0);
    let viewport = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    scroll_fraction(read_scroll_y(window), scroll_height, viewport)
}

/// Shared plumbing: recompute `measure` on every window scroll.
#[hook]
fn use_window_scroll(measure: fn(&Window) -> f64) -> f64 {
    let value = use_state(|| 0.0);

    {
        let value = value.clone();
        use_effect_with_deps(
            move |_| {
                let destructor: Box<dyn FnOnce()> = if let Some(window) = web_sys::window() {
                    value.set(measure(&window));
                    let callback = Closure::<dyn Fn()>::new(move || {
                        if let Some(win) = web_sys::window() {
                            value.set(measure(&win));
                        }
                    });
                    if let Err(e) = window
                        .add_event_listener_with_callback("scroll", callback.as_ref().unchecked_ref())
                    {
                        log::warn!("Failed to listen for scroll: {:?}", e);
                    }
                    Box::new(move || {
                        if let Some(win) = web_sys::window() {
                            let _ = win.remove_event_listener_with_callback(
                                "scroll",
                                callback.as_ref().unchecked_ref(),
                            );
                        }
                    })
                } else {
                    Box::new(|| ())
                };
                move || destructor()
            },
            (),
        );
    }

    *value
}

#[hook]
pub fn use_scroll_y() -> f64 {
    use_window_scroll(read_scroll_y)
}

#[hook]
pub fn use_scroll_progress() -> f64 {
    use_window_scroll(read_progress)
}

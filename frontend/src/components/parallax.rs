use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use web_sys::Element;
use yew::prelude::*;

use crate::hooks::use_reduced_motion;

/// Vertical shift in percent of the element's own height. Progress runs from
/// 0 when the element's top meets the viewport bottom to 1 when its bottom
/// leaves through the viewport top.
pub fn parallax_offset(top: f64, height: f64, viewport: f64, speed: f64) -> f64 {
    let span = viewport + height;
    if span <= 0.0 {
        return 0.0;
    }
    let progress = ((viewport - top) / span).clamp(0.0, 1.0);
    speed * 100.0 * progress
}

#[derive(Properties, PartialEq)]
pub struct ParallaxSectionProps {
    #[prop_or(0.5)]
    pub speed: f64,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(ParallaxSection)]
pub fn parallax_section(props: &ParallaxSectionProps) -> Html {
    let node = use_node_ref();
    let offset = use_state(|| 0.0);
    let reduced = use_reduced_motion();

    {
        let node = node.clone();
        let offset = offset.clone();
        use_effect_with_deps(
            move |(speed, reduced)| {
                let speed = *speed;
                let destructor: Box<dyn FnOnce()> = match web_sys::window() {
                    Some(window) if !*reduced => {
                        let measure = move || {
                            let Some(element) = node.cast::<Element>() else {
                                return;
                            };
                            let viewport = web_sys::window()
                                .and_then(|w| w.inner_height().ok())
                                .and_then(|v| v.as_f64())
                                .unwrap_or(0.0);
                            let rect = element.get_bounding_client_rect();
                            offset.set(parallax_offset(rect.top(), rect.height(), viewport, speed));
                        };
                        measure();
                        let callback = Closure::<dyn Fn()>::new(measure);
                        if let Err(e) = window
                            .add_event_listener_with_callback("scroll", callback.as_ref().unchecked_ref())
                        {
                            log::warn!("Failed to listen for scroll: {:?}", e);
                        }
                        Box::new(move || {
                            let _ = window.remove_event_listener_with_callback(
                                "scroll",
                                callback.as_ref().unchecked_ref(),
                            );
                        })
                    }
                    _ => {
                        offset.set(0.0);
                        Box::new(|| ())
                    }
                };
                move || destructor()
            },
            (props.speed, reduced),
        );
    }

    html! {
        <div ref={node} class={props.class.clone()} style={format!("transform: translateY({:.2}%); will-change: transform;", *offset)}>
            { for props.children.iter() }
        </div>
    }
}

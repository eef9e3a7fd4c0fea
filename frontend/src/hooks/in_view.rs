use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};
use yew::prelude::*;

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

#[derive(Clone, Debug, PartialEq)]
pub struct InViewOptions {
    pub threshold: f64,
    pub root_margin: String,
    /// Stop observing after the first intersection; the hook then stays `true`.
    pub trigger_once: bool,
}

impl Default for InViewOptions {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            root_margin: "0px".to_string(),
            trigger_once: false,
        }
    }
}

impl InViewOptions {
    /// Fires once the element's top passes 85% of the viewport height, the
    /// trigger point used by every scroll reveal on the page.
    pub fn reveal() -> Self {
        Self {
            threshold: 0.0,
            root_margin: "0px 0px -15% 0px".to_string(),
            trigger_once: true,
        }
    }
}

#[hook]
pub fn use_in_view(node: NodeRef, options: InViewOptions) -> bool {
    let in_view = use_state(|| false);

    {
        let in_view = in_view.clone();
        use_effect_with_deps(
            move |(node, options)| {
                let observer = node
                    .cast::<Element>()
                    .and_then(|element| observe(&element, options, in_view));
                move || {
                    if let Some((observer, _callback)) = observer {
                        observer.disconnect();
                    }
                }
            },
            (node, options),
        );
    }

    *in_view
}

fn observe(
    element: &Element,
    options: &InViewOptions,
    in_view: UseStateHandle<bool>,
) -> Option<(IntersectionObserver, ObserverCallback)> {
    let trigger_once = options.trigger_once;
    let handle = in_view.clone();
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                let visible = entry.is_intersecting();
                handle.set(visible);
                if visible && trigger_once {
                    observer.unobserve(&entry.target());
                }
            }
        },
    );

    let mut init = IntersectionObserverInit::new();
    init.root_margin(&options.root_margin);
    init.threshold(&JsValue::from_f64(options.threshold));

    let observer = match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
        Ok(observer) => observer,
        Err(e) => {
            log::warn!("IntersectionObserver unavailable: {:?}", e);
            in_view.set(true);
            return None;
        }
    };
    observer.observe(element);
    Some((observer, callback))
}

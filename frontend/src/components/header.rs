use web_sys::{ScrollBehavior, ScrollIntoViewOptions};
use yew::prelude::*;

use crate::components::ui::{Button, ButtonSize};
use crate::hooks::{use_scroll_progress, use_scroll_y};

pub const NAV_ITEMS: &[(&str, &str)] = &[
    ("Home", "hero"),
    ("Features", "features"),
    ("About", "about"),
    ("Mission", "mission"),
    ("Blog", "blog"),
    ("Contact", "contact"),
];

/// Header background fades in over the first 100px of scroll.
pub fn header_opacity(scroll_y: f64) -> f64 {
    (scroll_y / 100.0).clamp(0.0, 1.0)
}

pub fn header_style(opacity: f64) -> String {
    let blur = if opacity > 0.0 { "blur(12px)" } else { "none" };
    let shadow = if opacity > 0.5 {
        "0 4px 6px -1px rgba(0, 0, 0, 0.1)"
    } else {
        "none"
    };
    format!(
        "background-color: rgba(7, 130, 54, {:.2}); backdrop-filter: {}; box-shadow: {};",
        opacity, blur, shadow
    )
}

pub fn scroll_to_section(id: &str) {
    let Some(element) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
    else {
        log::warn!("No section with id {}", id);
        return;
    };
    let mut options = ScrollIntoViewOptions::new();
    options.behavior(ScrollBehavior::Smooth);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

#[function_component(Header)]
pub fn header() -> Html {
    let menu_open = use_state(|| false);
    let scroll_y = use_scroll_y();
    let progress = use_scroll_progress();
    let opacity = header_opacity(scroll_y);

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| menu_open.set(!*menu_open))
    };

    let nav_button = |label: &'static str, id: &'static str| {
        let menu_open = menu_open.clone();
        let onclick = Callback::from(move |_: MouseEvent| {
            scroll_to_section(id);
            menu_open.set(false);
        });
        html! { <button class="nav-link" {onclick}>{label}</button> }
    };

    let go_contact = Callback::from(|_: MouseEvent| scroll_to_section("contact"));

    html! {
        <header class="site-header" style={header_style(opacity)}>
            <div class="scroll-progress" style={format!("transform: scaleX({:.3});", progress)}></div>
            <div class="header-inner">
                <button class="logo" onclick={Callback::from(|_: MouseEvent| scroll_to_section("hero"))}>
                    <img src="/images/bijnis_logo.png" alt="Bijnis Logo" width="120" height="40" />
                </button>
                <nav class="desktop-nav">
                    { for NAV_ITEMS.iter().map(|&(label, id)| nav_button(label, id)) }
                </nav>
                <div class="desktop-cta">
                    <Button size={ButtonSize::Small} onclick={go_contact.clone()}>{"Get Started"}</Button>
                </div>
                <button
                    class={classes!("menu-toggle", (*menu_open).then_some("open"))}
                    aria-label="Toggle menu"
                    onclick={toggle_menu}
                >
                    <span></span><span></span><span></span>
                </button>
            </div>
            if *menu_open {
                <nav class="mobile-nav">
                    { for NAV_ITEMS.iter().map(|&(label, id)| nav_button(label, id)) }
                    <Button class="mobile-cta" onclick={go_contact}>{"Get Started"}</Button>
                </nav>
            }
        </header>
    }
}

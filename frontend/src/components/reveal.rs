//! Scroll-triggered entrance effects, played once per element.

use yew::prelude::*;

use crate::hooks::{use_in_view, use_reduced_motion, InViewOptions};

const EASE_OUT: &str = "cubic-bezier(0.215, 0.61, 0.355, 1)";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Starting offset in pixels the content travels from.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, 60),
            Direction::Down => (0, -60),
            Direction::Left => (-60, 0),
            Direction::Right => (60, 0),
        }
    }

    fn hidden_transform(self) -> String {
        let (x, y) = self.offset();
        format!("translate({}px, {}px)", x, y)
    }
}

/// Inline style for an element that is either waiting to be revealed or
/// animating in. Reduced motion gets no style at all.
pub fn reveal_style(
    hidden_transform: &str,
    shown: bool,
    reduced_motion: bool,
    delay_ms: u32,
    duration_ms: u32,
) -> String {
    if reduced_motion {
        return String::new();
    }
    if !shown {
        return format!("opacity: 0; transform: {};", hidden_transform);
    }
    format!(
        "opacity: 1; transform: none; transition: opacity {d}ms {e} {delay}ms, transform {d}ms {e} {delay}ms;",
        d = duration_ms,
        e = EASE_OUT,
        delay = delay_ms,
    )
}

#[derive(Properties, PartialEq)]
pub struct FadeInProps {
    #[prop_or_default]
    pub direction: Direction,
    #[prop_or_default]
    pub delay_ms: u32,
    #[prop_or(800)]
    pub duration_ms: u32,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(FadeIn)]
pub fn fade_in(props: &FadeInProps) -> Html {
    let node = use_node_ref();
    let shown = use_in_view(node.clone(), InViewOptions::reveal());
    let reduced = use_reduced_motion();
    let style = reveal_style(
        &props.direction.hidden_transform(),
        shown,
        reduced,
        props.delay_ms,
        props.duration_ms,
    );

    html! {
        <div ref={node} class={props.class.clone()} style={style}>
            { for props.children.iter() }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ScaleInProps {
    #[prop_or_default]
    pub delay_ms: u32,
    #[prop_or(800)]
    pub duration_ms: u32,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(ScaleIn)]
pub fn scale_in(props: &ScaleInProps) -> Html {
    let node = use_node_ref();
    let shown = use_in_view(node.clone(), InViewOptions::reveal());
    let reduced = use_reduced_motion();
    let style = reveal_style("scale(0.8)", shown, reduced, props.delay_ms, props.duration_ms);

    html! {
        <div ref={node} class={props.class.clone()} style={style}>
            { for props.children.iter() }
        </div>
    }
}

/// Delay for the `index`-th child of a staggered reveal.
pub fn stagger_delay(index: usize, stagger_ms: u32) -> u32 {
    u32::try_from(index)
        .unwrap_or(u32::MAX)
        .saturating_mul(stagger_ms)
}

#[derive(Properties, PartialEq)]
pub struct ScrollRevealProps {
    #[prop_or(100)]
    pub stagger_ms: u32,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub children: Children,
}

/// Reveals each child in turn once the container scrolls into view.
#[function_component(ScrollReveal)]
pub fn scroll_reveal(props: &ScrollRevealProps) -> Html {
    let node = use_node_ref();
    let shown = use_in_view(node.clone(), InViewOptions::reveal());
    let reduced = use_reduced_motion();

    html! {
        <div ref={node} class={props.class.clone()}>
            { for props.children.iter().enumerate().map(|(index, child)| {
                let style = reveal_style(
                    "translate(0px, 30px)",
                    shown,
                    reduced,
                    stagger_delay(index, props.stagger_ms),
                    600,
                );
                html! { <div style={style}>{ child }</div> }
            }) }
        </div>
    }
}

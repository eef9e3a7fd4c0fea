use web_sys::Element;
use yew::prelude::*;

use crate::hooks::use_reduced_motion;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Outline,
}

impl ButtonVariant {
    fn class(self) -> &'static str {
        match self {
            ButtonVariant::Primary => "btn-primary",
            ButtonVariant::Secondary => "btn-secondary",
            ButtonVariant::Outline => "btn-outline",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ButtonSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl ButtonSize {
    fn class(self) -> &'static str {
        match self {
            ButtonSize::Small => "btn-sm",
            ButtonSize::Medium => "btn-md",
            ButtonSize::Large => "btn-lg",
        }
    }
}

/// Share of the pointer's distance from the centre a magnetic button follows.
pub const MAGNETIC_PULL: f64 = 0.3;
const HOVER_SCALE: f64 = 1.05;
const EASE_OUT: &str = "cubic-bezier(0.25, 0.46, 0.45, 0.94)";

/// Offset that moves a button towards the pointer, given the pointer's client
/// position and the button's bounding box.
pub fn magnetic_offset(pointer: (f64, f64), left: f64, top: f64, width: f64, height: f64) -> (f64, f64) {
    let center_x = left + width / 2.0;
    let center_y = top + height / 2.0;
    (
        (pointer.0 - center_x) * MAGNETIC_PULL,
        (pointer.1 - center_y) * MAGNETIC_PULL,
    )
}

pub fn button_style(hovered: bool, offset: (f64, f64), reduced_motion: bool) -> String {
    if reduced_motion {
        return String::new();
    }
    let scale = if hovered { HOVER_SCALE } else { 1.0 };
    format!(
        "transform: translate({:.1}px, {:.1}px) scale({}); transition: transform 300ms {}, background 200ms, color 200ms;",
        offset.0, offset.1, scale, EASE_OUT
    )
}

#[derive(Properties, PartialEq)]
pub struct ButtonProps {
    #[prop_or_default]
    pub variant: ButtonVariant,
    #[prop_or_default]
    pub size: ButtonSize,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or(AttrValue::Static("button"))]
    pub kind: AttrValue,
    /// Follow the pointer while it is over the button.
    #[prop_or_default]
    pub magnetic: bool,
    #[prop_or_default]
    pub onclick: Callback<MouseEvent>,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(Button)]
pub fn button(props: &ButtonProps) -> Html {
    let node = use_node_ref();
    let hovered = use_state(|| false);
    let offset = use_state(|| (0.0, 0.0));
    let reduced = use_reduced_motion();

    let onmouseenter = {
        let hovered = hovered.clone();
        Callback::from(move |_: MouseEvent| hovered.set(true))
    };
    let onmouseleave = {
        let hovered = hovered.clone();
        let offset = offset.clone();
        Callback::from(move |_: MouseEvent| {
            hovered.set(false);
            offset.set((0.0, 0.0));
        })
    };
    let onmousemove = {
        let node = node.clone();
        let offset = offset.clone();
        let magnetic = props.magnetic;
        Callback::from(move |e: MouseEvent| {
            if !magnetic {
                return;
            }
            let Some(element) = node.cast::<Element>() else {
                return;
            };
            let rect = element.get_bounding_client_rect();
            offset.set(magnetic_offset(
                (f64::from(e.client_x()), f64::from(e.client_y())),
                rect.left(),
                rect.top(),
                rect.width(),
                rect.height(),
            ));
        })
    };

    html! {
        <button
            ref={node}
            type={props.kind.clone()}
            class={classes!("btn", props.variant.class(), props.size.class(), props.class.clone())}
            style={button_style(*hovered, *offset, reduced)}
            onclick={props.onclick.clone()}
            {onmouseenter}
            {onmouseleave}
            {onmousemove}
        >
            { for props.children.iter() }
        </button>
    }
}

#[derive(Properties, PartialEq)]
pub struct CardProps {
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(Card)]
pub fn card(props: &CardProps) -> Html {
    html! {
        <div class={classes!("card", props.class.clone())}>
            { for props.children.iter() }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct TextInputProps {
    #[prop_or(AttrValue::Static("text"))]
    pub kind: AttrValue,
    pub placeholder: AttrValue,
    pub value: AttrValue,
    pub oninput: Callback<InputEvent>,
}

#[function_component(TextInput)]
pub fn text_input(props: &TextInputProps) -> Html {
    html! {
        <input
            class="field"
            type={props.kind.clone()}
            placeholder={props.placeholder.clone()}
            value={props.value.clone()}
            oninput={props.oninput.clone()}
        />
    }
}

#[derive(Properties, PartialEq)]
pub struct TextAreaProps {
    pub placeholder: AttrValue,
    pub value: AttrValue,
    pub oninput: Callback<InputEvent>,
    #[prop_or(5)]
    pub rows: u32,
}

#[function_component(TextArea)]
pub fn text_area(props: &TextAreaProps) -> Html {
    html! {
        <textarea
            class="field"
            rows={props.rows.to_string()}
            placeholder={props.placeholder.clone()}
            value={props.value.clone()}
            oninput={props.oninput.clone()}
        />
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_at_the_centre_leaves_the_button_in_place() {
        assert_eq!(magnetic_offset((150.0, 40.0), 100.0, 20.0, 100.0, 40.0), (0.0, 0.0));
    }

    #[test]
    fn button_follows_a_fraction_of_the_pointer_distance() {
        // centre is (150, 40)
        let (x, y) = magnetic_offset((200.0, 30.0), 100.0, 20.0, 100.0, 40.0);
        assert!((x - 15.0).abs() < 1e-9);
        assert!((y + 3.0).abs() < 1e-9);
    }

    #[test]
    fn hover_scales_up_and_leaving_resets() {
        let hovered = button_style(true, (6.0, -2.5), false);
        assert!(hovered.starts_with("transform: translate(6.0px, -2.5px) scale(1.05);"));
        assert!(hovered.contains("transition: transform 300ms"));

        let idle = button_style(false, (0.0, 0.0), false);
        assert!(idle.starts_with("transform: translate(0.0px, 0.0px) scale(1);"));
    }

    #[test]
    fn reduced_motion_buttons_stay_still() {
        assert_eq!(button_style(true, (6.0, 2.0), true), "");
    }

    #[test]
    fn variants_map_to_their_classes() {
        assert_eq!(ButtonVariant::default().class(), "btn-primary");
        assert_eq!(ButtonVariant::Outline.class(), "btn-outline");
        assert_eq!(ButtonSize::Large.class(), "btn-lg");
    }
}

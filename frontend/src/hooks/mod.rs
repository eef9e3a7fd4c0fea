pub mod in_view;
pub mod reduced_motion;
pub mod scroll;

pub use in_view::{use_in_view, InViewOptions};
pub use reduced_motion::use_reduced_motion;
pub use scroll::{use_scroll_progress, use_scroll_y};

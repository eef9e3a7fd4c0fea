pub mod header;
pub mod loading_animation;
pub mod parallax;
pub mod reveal;
pub mod ui;

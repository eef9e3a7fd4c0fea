//! First-visit intro sequence: a session-gated overlay that buffers and plays
//! a short brand video, degrading to a quick fade on any failure.

pub mod browser;
pub mod controller;
pub mod driver;
pub mod error;
pub mod machine;
pub mod ports;
pub mod session;
#[cfg(test)]
mod sim;

pub use error::IntroError;
pub use machine::Sequencer;

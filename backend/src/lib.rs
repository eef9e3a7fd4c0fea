//! Static host for the Bijnis marketing site: serves the compiled Yew bundle
//! and its video assets.

pub mod config;
pub mod router;

pub use config::{ConfigError, ServerConfig};
pub use router::build_router;

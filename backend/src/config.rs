use std::num::ParseIntError;
use std::path::PathBuf;

use axum::http::HeaderValue;

const DEFAULT_DIST_DIR: &str = "frontend/dist";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_FRONTEND_URL: &str = "http://localhost:8080";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("PORT must be a port number, got {value:?}")]
    InvalidPort {
        value: String,
        #[source]
        source: ParseIntError,
    },
    #[error("FRONTEND_URL is not a valid origin: {0:?}")]
    InvalidOrigin(String),
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub dist_dir: PathBuf,
    pub port: u16,
    /// Only set in development, where trunk serves the bundle from its own port.
    pub cors_origin: Option<HeaderValue>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let dist_dir = lookup("SITE_DIST_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DIST_DIR));

        let port = match lookup("PORT") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|source| ConfigError::InvalidPort { value, source })?,
            None => DEFAULT_PORT,
        };

        let is_dev = lookup("ENVIRONMENT").as_deref() == Some("development");
        let cors_origin = if is_dev {
            let url = lookup("FRONTEND_URL").unwrap_or_else(|| DEFAULT_FRONTEND_URL.to_string());
            let origin = HeaderValue::from_str(url.trim_end_matches('/'))
                .map_err(|_| ConfigError::InvalidOrigin(url.clone()))?;
            Some(origin)
        } else {
            None
        };

        Ok(Self {
            dist_dir,
            port,
            cors_origin,
        })
    }

    pub fn index_file(&self) -> PathBuf {
        self.dist_dir.join("index.html")
    }

    pub fn videos_dir(&self) -> PathBuf {
        self.dist_dir.join("videos")
    }
}

use std::net::SocketAddr;

use anyhow::Context;
use bijnis_backend::{build_router, ServerConfig};
use dotenvy::dotenv;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,bijnis_backend=debug"));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    let config = ServerConfig::from_env().context("invalid server configuration")?;
    if !config.index_file().exists() {
        tracing::warn!(
            "{} not found, run `trunk build` in frontend/ first",
            config.index_file().display()
        );
    }
    if let Some(origin) = &config.cors_origin {
        tracing::debug!("CORS enabled for {:?}", origin);
    }

    let app = build_router(&config);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Serving {} on {}", config.dist_dir.display(), addr);
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app.into_make_service())
        .await
        .context("server stopped unexpectedly")?;
    Ok(())
}

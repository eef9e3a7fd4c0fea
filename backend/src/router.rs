use axum::http::{header, HeaderValue, Method, Response};
use axum::routing::get;
use axum::Router;
use tower::Layer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::fs::ServeFileSystemResponseBody;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::ServerConfig;

/// Video files are content-addressed by name and never change in place.
pub const VIDEO_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

async fn healthz() -> &'static str {
    "ok"
}

// Misses stay uncached so a late deploy of the asset is picked up.
fn video_cache_control(response: &Response<ServeFileSystemResponseBody>) -> Option<HeaderValue> {
    response
        .status()
        .is_success()
        .then(|| HeaderValue::from_static(VIDEO_CACHE_CONTROL))
}

pub fn build_router(config: &ServerConfig) -> Router {
    // Client-side navigation: anything that is not a file gets the app shell.
    let site = ServeDir::new(&config.dist_dir).fallback(ServeFile::new(config.index_file()));
    let videos = SetResponseHeaderLayer::overriding(header::CACHE_CONTROL, video_cache_control)
        .layer(ServeDir::new(config.videos_dir()));

    let app = Router::new()
        .route("/healthz", get(healthz))
        .nest_service("/videos", videos)
        .fallback_service(site)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

    match &config.cors_origin {
        Some(origin) => app.layer(
            CorsLayer::new()
                .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
                .allow_origin(AllowOrigin::exact(origin.clone()))
                .allow_headers([header::ACCEPT, header::RANGE]),
        ),
        None => app,
    }
}

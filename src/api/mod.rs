//! HTTP surface: rate endpoints, static front-end, CORS and request tracing

pub mod error;
pub mod handlers;

use axum::Router;
use axum::routing::get;
use std::path::Path;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::rates::RateService;

pub mod urls {
    pub const ROOT: &str = "/";
    pub const STATIC: &str = "/static";
    pub const LATEST: &str = "/api/latest";
    pub const HISTORICAL: &str = "/api/historical";
}

const INDEX_FILE: &str = "index.html";

#[derive(Clone)]
pub struct AppState {
    pub rates: RateService,
}

pub fn router(rates: RateService, static_dir: &Path) -> Router {
    Router::new()
        .route(urls::LATEST, get(handlers::latest))
        .route(urls::HISTORICAL, get(handlers::historical))
        .route_service(urls::ROOT, ServeFile::new(static_dir.join(INDEX_FILE)))
        .nest_service(urls::STATIC, ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        // Any origin, with credentials: the origin is mirrored back.
        .layer(CorsLayer::very_permissive())
        .with_state(AppState { rates })
}

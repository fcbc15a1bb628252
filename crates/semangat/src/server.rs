use std::path::Path;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::llm::ProviderRouter;
use crate::quotes::QuoteBook;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub router: ProviderRouter,
    pub quotes: QuoteBook,
}

impl AppState {
    pub fn new(router: ProviderRouter) -> Self {
        Self {
            router,
            quotes: QuoteBook,
        }
    }
}

/// Build the application router.
///
/// Unmatched GET paths are served from `static_dir`; anything that is not a
/// file there falls back to `static_dir/index.html` for client-side routing.
/// GETs to the POST-only API paths get `index.html` as well.
pub fn build_app(state: AppState, static_dir: &Path, request_timeout_secs: u64) -> Router {
    let index = ServeFile::new(static_dir.join("index.html"));
    let spa = ServeDir::new(static_dir).fallback(index.clone());

    let api = Router::new()
        .route("/quote", get(handlers::api::random_quote))
        .route(
            "/ai",
            post(handlers::api::ask_ai).fallback_service(index.clone()),
        )
        .route(
            "/social",
            post(handlers::api::share_link).fallback_service(index),
        )
        .with_state(state);

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api", api)
        .fallback_service(spa)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(request_timeout_secs),
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

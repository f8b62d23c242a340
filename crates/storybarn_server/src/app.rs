//! Router construction.

use crate::{handlers, AppState};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Build the API router over the given state.
///
/// Uploaded image bytes are served statically under `/uploads`, rooted at
/// the state's image store.
pub fn create_router(state: AppState) -> Router {
    let uploads = ServeDir::new(state.store.base_path());

    Router::new()
        .route("/api/stories/generate", post(handlers::stories::generate))
        .route("/api/stories/:id", get(handlers::stories::get))
        .route("/api/upload", post(handlers::upload::upload))
        .route("/api/images/generate", post(handlers::images::generate))
        .route(
            "/api/images/generate-dalle",
            post(handlers::images::generate_dalle),
        )
        .route("/api/images/:id/analyze", post(handlers::images::analyze))
        .route("/api/images", get(handlers::images::list))
        .route("/api/debug/logs", get(handlers::debug::logs))
        .route("/health", get(handlers::debug::health))
        .nest_service("/uploads", uploads)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

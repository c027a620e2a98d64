// Thin namespace wrapper for API-layer components
pub mod handlers {
    pub use crate::handlers::*;
}

use crate::handlers::{self as h, AppState};
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Builds the application router.
///
/// `/health` is outside the rate limiter; every `/api/*` route validates the
/// username and consults the limiter before running the pipeline.
pub fn router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/api/profile", get(h::get_profile))
        .route("/api/basic-info", get(h::get_basic_info))
        .route("/api/coding-stats", get(h::get_coding_stats))
        .route("/api/submission-data", get(h::get_submission_data))
        .route("/api/difficulty-stats", get(h::get_difficulty_stats))
        .route(
            "/api/institution-languages",
            get(h::get_institution_languages),
        )
        .route("/api/streak", get(h::get_streak));

    Router::new()
        .route("/health", get(h::health))
        .merge(api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

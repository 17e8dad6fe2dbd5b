pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::screening::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.config.max_request_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/analyze", post(handlers::handle_analyze))
        .route("/api/v1/parse", post(handlers::handle_parse))
        .route("/api/v1/score", post(handlers::handle_score))
        .route("/api/v1/highlight", post(handlers::handle_highlight))
        .route("/api/v1/report", post(handlers::handle_report))
        .layer(body_limit)
        .with_state(state)
}

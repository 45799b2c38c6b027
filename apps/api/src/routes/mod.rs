pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/generate-cv", post(handlers::handle_generate_cv))
        .route("/api/example-cv", get(handlers::handle_example_cv))
        .with_state(state)
}

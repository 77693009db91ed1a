use crate::handlers::{self, AJAX_PATH};
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/health", get(handlers::health))
        .route(AJAX_PATH, post(handlers::ajax))
        .with_state(state)
}

use axum::Router;

pub mod forms;
pub mod system;

/// Router for the versioned form API (nested under `/api/v1`).
pub fn router() -> Router {
    Router::new().nest("/forms", forms::router())
}

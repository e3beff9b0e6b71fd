use axum::{http::StatusCode, Json};
use serde_json::{json, Value};

use crate::app::errors::ApiFailure;

pub async fn health() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

/// Unmatched routes get the standard not-found envelope.
pub async fn not_found() -> ApiFailure {
    ApiFailure::NotFound
}

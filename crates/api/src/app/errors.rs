//! Boundary error model: one failure type, one classification table, one
//! JSON envelope.
//!
//! Handlers return `Result<_, ApiFailure>`. Turning an `ApiFailure` into a
//! response only parks it in the response extensions; the error middleware
//! later calls [`render`] with the request's trace id and the hosting
//! environment. That keeps classification, logging and serialization in one
//! place.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use myform_core::{DomainError, ValidationErrors};
use myform_infra::RepositoryError;

use crate::config::Environment;
use crate::context::TraceId;

pub const VALIDATION_FAILED: &str = "Validation failed";
pub const PERSISTENCE_FAILED: &str =
    "An error occurred while processing your request. Please try again later.";
pub const UNAUTHORIZED: &str = "You are not authorized to perform this action";
pub const NOT_FOUND: &str = "The requested resource was not found";
pub const UNEXPECTED: &str = "An unexpected error occurred. Please try again later.";

/// Every way a request can fail, by category.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiFailure {
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("{0}")]
    Persistence(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    #[error("{0}")]
    BadArgument(String),

    #[error("{0}")]
    Unclassified(String),
}

impl ApiFailure {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiFailure::Validation(_) | ApiFailure::BadArgument(_) => StatusCode::BAD_REQUEST,
            ApiFailure::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiFailure::NotFound => StatusCode::NOT_FOUND,
            ApiFailure::Persistence(_) | ApiFailure::Unclassified(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<ValidationErrors> for ApiFailure {
    fn from(value: ValidationErrors) -> Self {
        ApiFailure::Validation(value)
    }
}

impl From<RepositoryError> for ApiFailure {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::Persistence(msg) => ApiFailure::Persistence(msg),
        }
    }
}

impl From<DomainError> for ApiFailure {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::Validation(errors) => ApiFailure::Validation(errors),
            DomainError::InvalidId(msg) => ApiFailure::BadArgument(msg),
            DomainError::NotFound => ApiFailure::NotFound,
        }
    }
}

impl From<JsonRejection> for ApiFailure {
    fn from(value: JsonRejection) -> Self {
        ApiFailure::BadArgument(value.body_text())
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let mut response = self.status().into_response();
        response.extensions_mut().insert(self);
        response
    }
}

/// JSON body of every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<ValidationErrors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

/// The classification table: failure -> (status, envelope).
pub fn classify(
    failure: &ApiFailure,
    environment: Environment,
    trace_id: &TraceId,
) -> (StatusCode, ErrorResponse) {
    let (message, errors) = match failure {
        ApiFailure::Validation(errors) => (VALIDATION_FAILED.to_string(), Some(errors.clone())),
        ApiFailure::Persistence(detail) => {
            let message = if environment.is_development() {
                format!("Database error: {detail}")
            } else {
                PERSISTENCE_FAILED.to_string()
            };
            (message, None)
        }
        ApiFailure::Unauthorized => (UNAUTHORIZED.to_string(), None),
        ApiFailure::NotFound => (NOT_FOUND.to_string(), None),
        ApiFailure::BadArgument(msg) => (msg.clone(), None),
        ApiFailure::Unclassified(detail) => {
            let message = if environment.is_development() {
                detail.clone()
            } else {
                UNEXPECTED.to_string()
            };
            (message, None)
        }
    };

    (
        failure.status(),
        ErrorResponse {
            message,
            errors,
            trace_id: Some(trace_id.to_string()),
        },
    )
}

/// Classify, log once, and serialize a failure.
pub fn render(failure: &ApiFailure, environment: Environment, trace_id: &TraceId) -> Response {
    let (status, body) = classify(failure, environment, trace_id);

    if status.is_server_error() {
        tracing::error!(
            status = status.as_u16(),
            trace_id = %trace_id,
            error = %failure,
            "request failed"
        );
    } else {
        tracing::warn!(
            status = status.as_u16(),
            trace_id = %trace_id,
            error = %failure,
            "request failed"
        );
    }

    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trace() -> TraceId {
        TraceId::from_traceparent("00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01").unwrap()
    }

    #[test]
    fn validation_carries_field_errors() {
        let mut errors = ValidationErrors::new();
        errors.add("firstName", "First name is required.");

        let (status, body) = classify(
            &ApiFailure::Validation(errors.clone()),
            Environment::Production,
            &trace(),
        );
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.message, VALIDATION_FAILED);
        assert_eq!(body.errors, Some(errors));
        assert_eq!(body.trace_id.as_deref(), Some("4bf92f3577b34da6a3ce929d0e0e4736"));
    }

    #[test]
    fn persistence_detail_only_in_development() {
        let failure = ApiFailure::Persistence("connection refused".to_string());

        let (status, prod) = classify(&failure, Environment::Production, &trace());
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(prod.message, PERSISTENCE_FAILED);

        let (_, dev) = classify(&failure, Environment::Development, &trace());
        assert_eq!(dev.message, "Database error: connection refused");
    }

    #[test]
    fn unclassified_detail_only_in_development() {
        let failure = ApiFailure::Unclassified("boom".to_string());
        assert_eq!(classify(&failure, Environment::Production, &trace()).1.message, UNEXPECTED);
        assert_eq!(classify(&failure, Environment::Development, &trace()).1.message, "boom");
    }

    #[test]
    fn fixed_messages_and_statuses() {
        let (status, body) = classify(&ApiFailure::Unauthorized, Environment::Production, &trace());
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body.message, UNAUTHORIZED);

        let (status, body) = classify(&ApiFailure::NotFound, Environment::Production, &trace());
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.message, NOT_FOUND);

        let (status, body) = classify(
            &ApiFailure::BadArgument("FormId: invalid digit found in string".to_string()),
            Environment::Production,
            &trace(),
        );
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.message, "FormId: invalid digit found in string");
    }

    #[test]
    fn envelope_omits_absent_fields() {
        let (_, body) = classify(&ApiFailure::NotFound, Environment::Production, &trace());
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("errors").is_none());
        assert!(json.get("traceId").is_some());
    }

    #[test]
    fn parked_failure_is_recoverable_from_response() {
        let response = ApiFailure::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.extensions().get::<ApiFailure>(), Some(&ApiFailure::NotFound));
    }
}

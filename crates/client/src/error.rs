//! Normalization of HTTP failures into [`ApiError`].
//!
//! This is the only place that looks at raw status codes; everything above
//! the client works with the normalized shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use myform_core::ValidationErrors;

pub const NETWORK_ERROR: &str = "Network error. Please check your connection and try again.";
pub const INVALID_REQUEST: &str = "Invalid request. Please check your input.";
pub const UNAUTHORIZED: &str = "You are not authorized. Please log in.";
pub const FORBIDDEN: &str = "You do not have permission to perform this action.";
pub const NOT_FOUND: &str = "The requested resource was not found.";
pub const TIMEOUT: &str = "Request timeout. Please try again.";
pub const TOO_MANY_REQUESTS: &str = "Too many requests. Please wait a moment.";
pub const SERVER_ERROR: &str = "Server error. Please try again later.";

/// Client-visible failure of one API call.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<ValidationErrors>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errors: None,
            status_code: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status_code = Some(status);
        self
    }

    pub fn with_errors(mut self, errors: ValidationErrors) -> Self {
        self.errors = Some(errors);
        self
    }

    pub fn has_field_errors(&self) -> bool {
        self.errors.as_ref().is_some_and(|e| !e.is_empty())
    }
}

/// A failed call as seen by the transport: status `0` means the request never
/// got an HTTP response.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpFailure {
    pub status: u16,
    pub body: Option<Value>,
}

impl HttpFailure {
    pub fn network() -> Self {
        Self { status: 0, body: None }
    }

    fn server_message(&self) -> Option<String> {
        self.body
            .as_ref()?
            .get("message")?
            .as_str()
            .filter(|m| !m.is_empty())
            .map(str::to_string)
    }

    fn validation_errors(&self) -> Option<ValidationErrors> {
        let errors = self.body.as_ref()?.get("errors")?;
        if !errors.is_object() {
            return None;
        }
        serde_json::from_value(errors.clone()).ok()
    }
}

/// Map a failure onto the user-facing message table.
pub fn normalize(failure: &HttpFailure) -> ApiError {
    let errors = failure.validation_errors();

    let message = match failure.status {
        0 => NETWORK_ERROR.to_string(),
        400 => errors
            .as_ref()
            .and_then(|e| e.first_message())
            .map(str::to_string)
            .or_else(|| failure.server_message())
            .unwrap_or_else(|| INVALID_REQUEST.to_string()),
        401 => UNAUTHORIZED.to_string(),
        403 => FORBIDDEN.to_string(),
        404 => NOT_FOUND.to_string(),
        408 => TIMEOUT.to_string(),
        429 => TOO_MANY_REQUESTS.to_string(),
        s if s >= 500 => SERVER_ERROR.to_string(),
        s => failure
            .server_message()
            .unwrap_or_else(|| format!("An unexpected error occurred. ({s})")),
    };

    ApiError {
        message,
        errors,
        status_code: Some(failure.status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn failure(status: u16, body: Option<Value>) -> HttpFailure {
        HttpFailure { status, body }
    }

    #[test]
    fn network_failures_use_status_zero() {
        let err = normalize(&HttpFailure::network());
        assert_eq!(err.message, NETWORK_ERROR);
        assert_eq!(err.status_code, Some(0));
    }

    #[test]
    fn bad_request_prefers_first_field_message() {
        let body = json!({
            "message": "Validation failed",
            "errors": { "firstName": ["First name is required."] },
            "traceId": "abc"
        });
        let err = normalize(&failure(400, Some(body)));
        assert_eq!(err.message, "First name is required.");
        assert!(err.has_field_errors());
        assert_eq!(
            err.errors.unwrap().get("firstName").unwrap(),
            ["First name is required."]
        );
    }

    #[test]
    fn bad_request_falls_back_to_server_then_generic_message() {
        let err = normalize(&failure(400, Some(json!({ "message": "FormId: bad" }))));
        assert_eq!(err.message, "FormId: bad");
        assert!(err.errors.is_none());

        let err = normalize(&failure(400, None));
        assert_eq!(err.message, INVALID_REQUEST);
    }

    #[test]
    fn fixed_messages_per_status() {
        let cases = [
            (401, UNAUTHORIZED),
            (403, FORBIDDEN),
            (404, NOT_FOUND),
            (408, TIMEOUT),
            (429, TOO_MANY_REQUESTS),
            (500, SERVER_ERROR),
            (503, SERVER_ERROR),
        ];
        for (status, message) in cases {
            let err = normalize(&failure(status, Some(json!({ "message": "ignored" }))));
            assert_eq!(err.message, message, "status {status}");
            assert_eq!(err.status_code, Some(status));
        }
    }

    #[test]
    fn other_statuses_embed_the_code() {
        let err = normalize(&failure(418, None));
        assert_eq!(err.message, "An unexpected error occurred. (418)");

        let err = normalize(&failure(409, Some(json!({ "message": "conflict" }))));
        assert_eq!(err.message, "conflict");
    }

    #[test]
    fn non_object_errors_are_ignored() {
        let err = normalize(&failure(400, Some(json!({ "errors": ["nope"] }))));
        assert!(err.errors.is_none());
        assert_eq!(err.message, INVALID_REQUEST);
    }
}

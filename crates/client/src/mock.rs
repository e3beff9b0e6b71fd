//! Canned failures for exercising the error paths without a misbehaving
//! server.

use myform_core::ValidationErrors;

use crate::error::{
    ApiError, NETWORK_ERROR, NOT_FOUND, SERVER_ERROR, TIMEOUT, TOO_MANY_REQUESTS, UNAUTHORIZED,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MockErrorKind {
    Network,
    Validation,
    Server,
    NotFound,
    Unauthorized,
    Timeout,
    RateLimit,
}

impl MockErrorKind {
    pub const ALL: [MockErrorKind; 7] = [
        MockErrorKind::Network,
        MockErrorKind::Validation,
        MockErrorKind::Server,
        MockErrorKind::NotFound,
        MockErrorKind::Unauthorized,
        MockErrorKind::Timeout,
        MockErrorKind::RateLimit,
    ];

    pub fn error(self) -> ApiError {
        match self {
            MockErrorKind::Network => ApiError::new(NETWORK_ERROR).with_status(0),
            MockErrorKind::Validation => {
                let mut errors = ValidationErrors::new();
                errors.add("firstName", "First name is required.");
                errors.add("lastName", "Last name must not exceed 100 characters.");
                ApiError::new("Validation failed")
                    .with_status(400)
                    .with_errors(errors)
            }
            MockErrorKind::Server => ApiError::new(SERVER_ERROR).with_status(500),
            MockErrorKind::NotFound => ApiError::new(NOT_FOUND).with_status(404),
            MockErrorKind::Unauthorized => ApiError::new(UNAUTHORIZED).with_status(401),
            MockErrorKind::Timeout => ApiError::new(TIMEOUT).with_status(408),
            MockErrorKind::RateLimit => ApiError::new(TOO_MANY_REQUESTS).with_status(429),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_validation_carries_field_errors() {
        for kind in MockErrorKind::ALL {
            let error = kind.error();
            assert_eq!(error.has_field_errors(), kind == MockErrorKind::Validation, "{kind:?}");
            assert!(error.status_code.is_some());
        }
    }
}

//! Request pipeline middleware, outermost first:
//!
//! 1. [`trace_id_middleware`]: assigns the request's [`TraceId`] and span.
//! 2. [`error_middleware`]: turns parked [`ApiFailure`]s and panics into
//!    error envelopes.
//! 3. [`auth_guard`]: optional static bearer token check on `/api/v1`.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use futures::FutureExt;
use tracing::Instrument;

use crate::app::errors::{self, ApiFailure};
use crate::config::Environment;
use crate::context::TraceId;

pub const TRACEPARENT_HEADER: &str = "traceparent";
pub const TRACE_ID_HEADER: &str = "x-trace-id";

pub async fn trace_id_middleware(
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let trace_id = req
        .headers()
        .get(TRACEPARENT_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(TraceId::from_traceparent)
        .unwrap_or_else(TraceId::generate);

    let span = tracing::info_span!(
        "http_request",
        method = %req.method(),
        path = %req.uri().path(),
        trace_id = %trace_id,
    );

    req.extensions_mut().insert(trace_id.clone());

    let mut response = next.run(req).instrument(span).await;
    if let Ok(value) = HeaderValue::from_str(trace_id.as_str()) {
        response.headers_mut().insert(TRACE_ID_HEADER, value);
    }
    response
}

#[derive(Debug, Copy, Clone)]
pub struct ErrorState {
    pub environment: Environment,
}

/// The only place failures are classified, logged and serialized.
pub async fn error_middleware(
    State(state): State<ErrorState>,
    req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let trace_id = req
        .extensions()
        .get::<TraceId>()
        .cloned()
        .unwrap_or_else(TraceId::generate);

    let mut response = match AssertUnwindSafe(next.run(req)).catch_unwind().await {
        Ok(response) => response,
        Err(panic) => ApiFailure::Unclassified(panic_message(panic.as_ref())).into_response(),
    };

    match response.extensions_mut().remove::<ApiFailure>() {
        Some(failure) => errors::render(&failure, state.environment, &trace_id),
        None => response,
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "handler panicked".to_string()
    }
}

#[derive(Debug, Clone, Default)]
pub struct AuthState {
    /// Expected bearer token; `None` leaves the guard inert.
    pub api_token: Option<Arc<str>>,
}

pub async fn auth_guard(
    State(state): State<AuthState>,
    req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let Some(expected) = state.api_token.as_deref() else {
        return next.run(req).await;
    };

    let authorized = extract_bearer(req.headers()).is_some_and(|token| token == expected);
    if !authorized {
        return ApiFailure::Unauthorized.into_response();
    }

    next.run(req).await
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?;
    let header = header.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    Some(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::AUTHORIZATION;

    #[test]
    fn extracts_bearer_tokens() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_bearer(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc "));
        assert_eq!(extract_bearer(&headers), Some("abc"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(extract_bearer(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer   "));
        assert_eq!(extract_bearer(&headers), None);
    }

    #[test]
    fn panic_payloads_become_messages() {
        let payload: Box<dyn Any + Send> = Box::new("static str");
        assert_eq!(panic_message(payload.as_ref()), "static str");

        let payload: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(payload.as_ref()), "owned");

        let payload: Box<dyn Any + Send> = Box::new(42_u8);
        assert_eq!(panic_message(payload.as_ref()), "handler panicked");
    }
}

//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: composition root (repository + handlers + service)
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: response DTOs and mapping from handler results
//! - `errors.rs`: failure taxonomy and the error envelope

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use myform_infra::FormService;

use crate::config::ApiConfig;
use crate::middleware::{self, AuthState, ErrorState};

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Prefix of the versioned form API.
pub const API_V1: &str = "/api/v1";

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub async fn build_app(config: &ApiConfig) -> anyhow::Result<Router> {
    let services = services::build_services(config).await?;
    Ok(router(services, config))
}

/// Assemble the router around an already-built service.
pub fn router(services: Arc<dyn FormService>, config: &ApiConfig) -> Router {
    let auth_state = AuthState {
        api_token: config.api_token.as_deref().map(Arc::from),
    };
    let error_state = ErrorState {
        environment: config.environment,
    };

    let api = routes::router().layer(axum::middleware::from_fn_with_state(
        auth_state,
        middleware::auth_guard,
    ));

    Router::new()
        .route("/health", get(routes::system::health))
        .nest(API_V1, api)
        .fallback(routes::system::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::trace_id_middleware))
                .layer(axum::middleware::from_fn_with_state(
                    error_state,
                    middleware::error_middleware,
                ))
                .layer(Extension(services)),
        )
}

//! HTTP API: configuration, routing, request/response mapping and the
//! boundary error handling for the form service.

pub mod app;
pub mod config;
pub mod context;
pub mod middleware;

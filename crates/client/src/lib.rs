//! `myform-client`
//!
//! **Responsibility:** the client half of form submission.
//!
//! This crate provides:
//! - [`FormClient`]: HTTP access with bounded exponential-backoff retry
//! - [`ApiError`]: the single normalized failure shape callers ever see
//! - [`Signal`]: observable state cells (get / set / subscribe)
//! - [`FormState`] and [`FormComponent`]: UI-local state and the form's
//!   load / submit / delete flows

pub mod component;
pub mod config;
pub mod error;
pub mod mock;
pub mod retry;
pub mod service;
pub mod signal;
pub mod state;
pub mod transport;

pub use component::{FieldControl, FormComponent, Notification, NotificationKind, SubmitOutcome};
pub use config::{ApiEndpoints, ClientConfig};
pub use error::ApiError;
pub use mock::MockErrorKind;
pub use retry::RetryPolicy;
pub use service::FormClient;
pub use signal::{ReadSignal, Signal};
pub use state::{ErrorState, FormState, LoadingState};
pub use transport::{HttpRequest, HttpResponse, Method, ReqwestTransport, Transport, TransportError};

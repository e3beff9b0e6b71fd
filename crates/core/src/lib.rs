//! `myform-core`: domain foundation for form submissions.
//!
//! This crate contains **pure domain** types (no infrastructure concerns): the
//! form record, its identifier, and the create-request validation rules shared
//! by the server and the client.

pub mod entity;
pub mod error;
pub mod form;
pub mod id;
pub mod validation;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use form::{Form, NewForm};
pub use id::FormId;
pub use validation::{CreateFormRequest, FormField, ValidationErrors, NAME_MAX_LEN, NAME_MIN_LEN};

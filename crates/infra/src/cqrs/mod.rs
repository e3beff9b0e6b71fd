//! Command/query handling (application-level orchestration).
//!
//! Each operation has one intent type and one handler:
//!
//! ```text
//! CreateFormCommand  -> CreateFormHandler   -> CreatedForm
//! DeleteFormCommand  -> DeleteFormHandler   -> DeletedForm
//! GetAllFormsQuery   -> GetAllFormsHandler  -> AllForms
//! GetFormByIdQuery   -> GetFormByIdHandler  -> Option<Form>
//! ```
//!
//! A handler performs exactly one repository call, logs one structured line
//! and maps the stored record into a result value. Store failures bubble up
//! unmodified and unlogged; the HTTP boundary classifies and logs them.

use async_trait::async_trait;

pub mod commands;
pub mod queries;
pub mod results;

pub use commands::{CreateFormCommand, CreateFormHandler, DeleteFormCommand, DeleteFormHandler};
pub use queries::{GetAllFormsHandler, GetAllFormsQuery, GetFormByIdHandler, GetFormByIdQuery};
pub use results::{AllForms, CreatedForm, DeletedForm};

/// Handles a state-changing intent.
///
/// Commands are consumed: each value is handled at most once.
#[async_trait]
pub trait CommandHandler<C>: Send + Sync
where
    C: Send + 'static,
{
    type Output: Send;
    type Error: core::fmt::Debug + Send + Sync + 'static;

    async fn handle(&self, command: C) -> Result<Self::Output, Self::Error>;
}

/// Handles a read-only intent.
#[async_trait]
pub trait QueryHandler<Q>: Send + Sync
where
    Q: Send + 'static,
{
    type Output: Send;
    type Error: core::fmt::Debug + Send + Sync + 'static;

    async fn handle(&self, query: Q) -> Result<Self::Output, Self::Error>;
}

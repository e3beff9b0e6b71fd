//! Form persistence abstractions.
//!
//! One round trip to the backing store per call, no caching and no
//! application-level locking: concurrent writers rely on the store's own
//! row-level consistency.
//!
//! Every method is an `async fn`; dropping the returned future (for example
//! when the HTTP client disconnects and axum drops the handler) cancels the
//! in-flight store call.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use myform_core::{Form, FormId, NewForm};

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryFormRepository;
pub use postgres::PostgresFormRepository;

/// Store failure. Connectivity, constraint and decoding faults are not
/// distinguished further.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("persistence failure: {0}")]
    Persistence(String),
}

impl RepositoryError {
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }
}

impl From<sqlx::Error> for RepositoryError {
    fn from(value: sqlx::Error) -> Self {
        Self::Persistence(value.to_string())
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Single-entity store for form submissions.
///
/// Inputs are trusted: name validation happens upstream.
#[async_trait]
pub trait FormRepository: Send + Sync {
    /// All stored forms, ordered by ascending id.
    async fn get_all(&self) -> RepositoryResult<Vec<Form>>;

    async fn get_by_id(&self, id: FormId) -> RepositoryResult<Option<Form>>;

    /// Store a new form; the store assigns `id` and `created_at`.
    async fn create(&self, form: NewForm) -> RepositoryResult<Form>;

    async fn exists(&self, id: FormId) -> RepositoryResult<bool>;

    /// Returns `true` iff a row was removed.
    async fn delete(&self, id: FormId) -> RepositoryResult<bool>;
}

#[async_trait]
impl<R> FormRepository for Arc<R>
where
    R: FormRepository + ?Sized,
{
    async fn get_all(&self) -> RepositoryResult<Vec<Form>> {
        (**self).get_all().await
    }

    async fn get_by_id(&self, id: FormId) -> RepositoryResult<Option<Form>> {
        (**self).get_by_id(id).await
    }

    async fn create(&self, form: NewForm) -> RepositoryResult<Form> {
        (**self).create(form).await
    }

    async fn exists(&self, id: FormId) -> RepositoryResult<bool> {
        (**self).exists(id).await
    }

    async fn delete(&self, id: FormId) -> RepositoryResult<bool> {
        (**self).delete(id).await
    }
}

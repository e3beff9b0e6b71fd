//! Infrastructure layer: form persistence, command/query handlers, and the
//! application service that fronts them.

pub mod cqrs;
pub mod repository;
pub mod service;

pub use repository::{
    FormRepository, InMemoryFormRepository, PostgresFormRepository, RepositoryError,
    RepositoryResult,
};
pub use service::{FormApplicationService, FormService};

use async_trait::async_trait;

use myform_core::{FormId, NewForm};

use crate::repository::{FormRepository, RepositoryError};

use super::results::{CreatedForm, DeletedForm};
use super::CommandHandler;

/// Store a new submission. Built only from an already-validated request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateFormCommand {
    pub first_name: String,
    pub last_name: String,
}

impl From<NewForm> for CreateFormCommand {
    fn from(value: NewForm) -> Self {
        Self {
            first_name: value.first_name,
            last_name: value.last_name,
        }
    }
}

/// Remove a submission by id.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DeleteFormCommand {
    pub id: FormId,
}

#[derive(Debug, Clone)]
pub struct CreateFormHandler<R> {
    repository: R,
}

impl<R> CreateFormHandler<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> CommandHandler<CreateFormCommand> for CreateFormHandler<R>
where
    R: FormRepository,
{
    type Output = CreatedForm;
    type Error = RepositoryError;

    async fn handle(&self, command: CreateFormCommand) -> Result<CreatedForm, RepositoryError> {
        let created = self
            .repository
            .create(NewForm::new(command.first_name, command.last_name))
            .await?;

        tracing::info!(form_id = %created.id, "form created");

        Ok(CreatedForm::from(created))
    }
}

#[derive(Debug, Clone)]
pub struct DeleteFormHandler<R> {
    repository: R,
}

impl<R> DeleteFormHandler<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> CommandHandler<DeleteFormCommand> for DeleteFormHandler<R>
where
    R: FormRepository,
{
    type Output = DeletedForm;
    type Error = RepositoryError;

    async fn handle(&self, command: DeleteFormCommand) -> Result<DeletedForm, RepositoryError> {
        let removed = self.repository.delete(command.id).await?;

        if removed {
            tracing::info!(form_id = %command.id, "form deleted");
        } else {
            tracing::warn!(form_id = %command.id, "form not found for deletion");
        }

        Ok(DeletedForm {
            success: removed,
            id: command.id,
        })
    }
}

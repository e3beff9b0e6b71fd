//! Application service: the single entry point the HTTP layer calls.
//!
//! Pure dispatch. Each operation is forwarded to its handler; the service holds
//! no state of its own beyond the handlers it was built with.

use async_trait::async_trait;

use myform_core::{Form, FormId};

use crate::cqrs::{
    AllForms, CommandHandler, CreateFormCommand, CreateFormHandler, CreatedForm, DeleteFormCommand,
    DeleteFormHandler, DeletedForm, GetAllFormsHandler, GetAllFormsQuery, GetFormByIdHandler,
    GetFormByIdQuery, QueryHandler,
};
use crate::repository::{FormRepository, RepositoryError};

/// Facade over the form handlers.
#[async_trait]
pub trait FormService: Send + Sync {
    async fn create_form(&self, command: CreateFormCommand) -> Result<CreatedForm, RepositoryError>;

    async fn delete_form(&self, command: DeleteFormCommand) -> Result<DeletedForm, RepositoryError>;

    async fn get_all_forms(&self) -> Result<AllForms, RepositoryError>;

    async fn get_form(&self, id: FormId) -> Result<Option<Form>, RepositoryError>;
}

/// Handler-backed [`FormService`] sharing one repository handle.
#[derive(Debug, Clone)]
pub struct FormApplicationService<R> {
    create: CreateFormHandler<R>,
    delete: DeleteFormHandler<R>,
    get_all: GetAllFormsHandler<R>,
    get_by_id: GetFormByIdHandler<R>,
}

impl<R> FormApplicationService<R>
where
    R: FormRepository + Clone,
{
    pub fn new(repository: R) -> Self {
        Self {
            create: CreateFormHandler::new(repository.clone()),
            delete: DeleteFormHandler::new(repository.clone()),
            get_all: GetAllFormsHandler::new(repository.clone()),
            get_by_id: GetFormByIdHandler::new(repository),
        }
    }
}

#[async_trait]
impl<R> FormService for FormApplicationService<R>
where
    R: FormRepository + Clone,
{
    async fn create_form(&self, command: CreateFormCommand) -> Result<CreatedForm, RepositoryError> {
        self.create.handle(command).await
    }

    async fn delete_form(&self, command: DeleteFormCommand) -> Result<DeletedForm, RepositoryError> {
        self.delete.handle(command).await
    }

    async fn get_all_forms(&self) -> Result<AllForms, RepositoryError> {
        self.get_all.handle(GetAllFormsQuery).await
    }

    async fn get_form(&self, id: FormId) -> Result<Option<Form>, RepositoryError> {
        self.get_by_id.handle(GetFormByIdQuery { id }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryFormRepository;
    use std::sync::Arc;

    fn service() -> FormApplicationService<Arc<InMemoryFormRepository>> {
        FormApplicationService::new(Arc::new(InMemoryFormRepository::new()))
    }

    #[tokio::test]
    async fn dispatches_create_list_delete() {
        let svc = service();

        let created = svc
            .create_form(CreateFormCommand {
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
            })
            .await
            .unwrap();

        let all = svc.get_all_forms().await.unwrap();
        assert_eq!(all.forms.len(), 1);
        assert_eq!(all.forms[0].id, created.id);
        assert_eq!(svc.get_form(created.id).await.unwrap().unwrap().last_name, "Lovelace");

        let deleted = svc.delete_form(DeleteFormCommand { id: created.id }).await.unwrap();
        assert!(deleted.success);
        assert!(svc.get_all_forms().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn usable_as_trait_object() {
        let svc: Arc<dyn FormService> = Arc::new(service());
        let deleted = svc
            .delete_form(DeleteFormCommand { id: FormId::new(5) })
            .await
            .unwrap();
        assert!(!deleted.success);
    }
}

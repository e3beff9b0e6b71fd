use async_trait::async_trait;

use myform_core::{Form, FormId};

use crate::repository::{FormRepository, RepositoryError};

use super::results::AllForms;
use super::QueryHandler;

/// List every submission.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct GetAllFormsQuery;

/// Look up one submission.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GetFormByIdQuery {
    pub id: FormId,
}

#[derive(Debug, Clone)]
pub struct GetAllFormsHandler<R> {
    repository: R,
}

impl<R> GetAllFormsHandler<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> QueryHandler<GetAllFormsQuery> for GetAllFormsHandler<R>
where
    R: FormRepository,
{
    type Output = AllForms;
    type Error = RepositoryError;

    async fn handle(&self, _query: GetAllFormsQuery) -> Result<AllForms, RepositoryError> {
        let forms = self.repository.get_all().await?;

        tracing::info!(count = forms.len(), "retrieved forms");

        Ok(AllForms { forms })
    }
}

#[derive(Debug, Clone)]
pub struct GetFormByIdHandler<R> {
    repository: R,
}

impl<R> GetFormByIdHandler<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> QueryHandler<GetFormByIdQuery> for GetFormByIdHandler<R>
where
    R: FormRepository,
{
    type Output = Option<Form>;
    type Error = RepositoryError;

    async fn handle(&self, query: GetFormByIdQuery) -> Result<Option<Form>, RepositoryError> {
        let form = self.repository.get_by_id(query.id).await?;

        match &form {
            Some(_) => tracing::info!(form_id = %query.id, "form retrieved"),
            None => tracing::warn!(form_id = %query.id, "form not found"),
        }

        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryFormRepository;
    use myform_core::NewForm;
    use std::sync::Arc;

    #[tokio::test]
    async fn get_all_maps_every_row() {
        let repo = Arc::new(InMemoryFormRepository::new());
        repo.create(NewForm::new("Ada", "Lovelace")).await.unwrap();
        repo.create(NewForm::new("Alan", "Turing")).await.unwrap();

        let all = GetAllFormsHandler::new(repo).handle(GetAllFormsQuery).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all.forms[1].first_name, "Alan");
    }

    #[tokio::test]
    async fn get_by_id_returns_none_for_unknown_ids() {
        let repo = Arc::new(InMemoryFormRepository::new());
        let handler = GetFormByIdHandler::new(repo);

        let found = handler
            .handle(GetFormByIdQuery { id: FormId::new(99) })
            .await
            .unwrap();
        assert!(found.is_none());
    }
}

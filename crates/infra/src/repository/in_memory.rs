use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use myform_core::{Form, FormId, NewForm};

use super::{FormRepository, RepositoryError, RepositoryResult};

#[derive(Debug)]
struct Rows {
    next_id: i32,
    forms: BTreeMap<FormId, Form>,
}

/// In-memory form store for tests/dev.
///
/// Ids start at 1 and are never reused, even after deletes.
#[derive(Debug)]
pub struct InMemoryFormRepository {
    inner: RwLock<Rows>,
}

impl InMemoryFormRepository {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Rows {
                next_id: 1,
                forms: BTreeMap::new(),
            }),
        }
    }
}

impl Default for InMemoryFormRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<T>(_: T) -> RepositoryError {
    RepositoryError::persistence("in-memory form store lock poisoned")
}

#[async_trait]
impl FormRepository for InMemoryFormRepository {
    async fn get_all(&self) -> RepositoryResult<Vec<Form>> {
        let rows = self.inner.read().map_err(poisoned)?;
        Ok(rows.forms.values().cloned().collect())
    }

    async fn get_by_id(&self, id: FormId) -> RepositoryResult<Option<Form>> {
        let rows = self.inner.read().map_err(poisoned)?;
        Ok(rows.forms.get(&id).cloned())
    }

    async fn create(&self, form: NewForm) -> RepositoryResult<Form> {
        let mut rows = self.inner.write().map_err(poisoned)?;
        let id = FormId::new(rows.next_id);
        rows.next_id = rows
            .next_id
            .checked_add(1)
            .ok_or_else(|| RepositoryError::persistence("form id sequence exhausted"))?;

        let stored = form.into_form(id, Utc::now());
        rows.forms.insert(id, stored.clone());
        Ok(stored)
    }

    async fn exists(&self, id: FormId) -> RepositoryResult<bool> {
        let rows = self.inner.read().map_err(poisoned)?;
        Ok(rows.forms.contains_key(&id))
    }

    async fn delete(&self, id: FormId) -> RepositoryResult<bool> {
        let mut rows = self.inner.write().map_err(poisoned)?;
        Ok(rows.forms.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_assigns_increasing_ids() {
        let repo = InMemoryFormRepository::new();
        let before = Utc::now();

        let a = repo.create(NewForm::new("Ada", "Lovelace")).await.unwrap();
        let b = repo.create(NewForm::new("Grace", "Hopper")).await.unwrap();

        assert_eq!(a.id, FormId::new(1));
        assert!(b.id > a.id);
        assert!(a.created_at >= before);
        assert_eq!(a.first_name, "Ada");
    }

    #[tokio::test]
    async fn get_all_is_ordered_by_id() {
        let repo = InMemoryFormRepository::new();
        for name in ["C", "A", "B"] {
            repo.create(NewForm::new(name, "X")).await.unwrap();
        }

        let first = repo.get_all().await.unwrap();
        let second = repo.get_all().await.unwrap();
        let ids: Vec<i32> = first.iter().map(|f| f.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_was_removed() {
        let repo = InMemoryFormRepository::new();
        let form = repo.create(NewForm::new("Ada", "Lovelace")).await.unwrap();

        assert!(repo.exists(form.id).await.unwrap());
        assert!(repo.delete(form.id).await.unwrap());
        assert!(!repo.exists(form.id).await.unwrap());
        assert!(!repo.delete(form.id).await.unwrap());
        assert!(repo.get_by_id(form.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let repo = InMemoryFormRepository::new();
        let a = repo.create(NewForm::new("Ada", "Lovelace")).await.unwrap();
        repo.delete(a.id).await.unwrap();

        let b = repo.create(NewForm::new("Grace", "Hopper")).await.unwrap();
        assert_eq!(b.id, FormId::new(2));
    }
}

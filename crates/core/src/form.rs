//! The form submission record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::id::FormId;

/// A persisted form submission.
///
/// `id` and `created_at` are assigned by the repository and never change.
/// Names are trusted as already validated; the record does not re-check them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Form {
    pub id: FormId,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}

impl Entity for Form {
    type Id = FormId;

    fn id(&self) -> FormId {
        self.id
    }
}

/// A form submission that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewForm {
    pub first_name: String,
    pub last_name: String,
}

impl NewForm {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Attach the store-assigned identity.
    pub fn into_form(self, id: FormId, created_at: DateTime<Utc>) -> Form {
        Form {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_camel_case_fields() {
        let created_at = DateTime::parse_from_rfc3339("2025-01-02T03:04:05Z")
            .unwrap()
            .with_timezone(&Utc);
        let form = NewForm::new("Ada", "Lovelace").into_form(FormId::new(1), created_at);

        let json = serde_json::to_value(&form).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["firstName"], "Ada");
        assert_eq!(json["lastName"], "Lovelace");
        assert_eq!(json["createdAt"], "2025-01-02T03:04:05Z");
        assert_eq!(form.id(), FormId::new(1));
    }
}

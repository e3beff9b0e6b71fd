use chrono::{DateTime, Utc};
use serde::Serialize;

use myform_core::{Form, FormId};
use myform_infra::cqrs::CreatedForm;

// -------------------------
// Response DTOs
// -------------------------

/// Wire shape of a stored form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormResponse {
    pub id: FormId,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<Form> for FormResponse {
    fn from(value: Form) -> Self {
        Self {
            id: value.id,
            first_name: value.first_name,
            last_name: value.last_name,
            created_at: value.created_at,
        }
    }
}

impl From<CreatedForm> for FormResponse {
    fn from(value: CreatedForm) -> Self {
        Self {
            id: value.id,
            first_name: value.first_name,
            last_name: value.last_name,
            created_at: value.created_at,
        }
    }
}

pub fn forms_to_response(forms: Vec<Form>) -> Vec<FormResponse> {
    forms.into_iter().map(FormResponse::from).collect()
}

//! Immutable values returned by handlers.

use chrono::{DateTime, Utc};

use myform_core::{Form, FormId};

/// A freshly stored form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedForm {
    pub id: FormId,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<Form> for CreatedForm {
    fn from(value: Form) -> Self {
        Self {
            id: value.id,
            first_name: value.first_name,
            last_name: value.last_name,
            created_at: value.created_at,
        }
    }
}

/// Outcome of a delete. `success` is `false` when no such form existed; the
/// caller decides what that means for its protocol.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DeletedForm {
    pub success: bool,
    pub id: FormId,
}

/// Every stored form, ordered by ascending id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllForms {
    pub forms: Vec<Form>,
}

impl AllForms {
    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}

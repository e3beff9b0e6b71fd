//! Create-request validation rules.
//!
//! The server runs these before a create command is built; the repository
//! never re-checks them. Messages are fixed strings so clients can match on
//! them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::form::NewForm;

/// Minimum accepted name length (in characters).
pub const NAME_MIN_LEN: usize = 1;

/// Maximum accepted name length (in characters).
pub const NAME_MAX_LEN: usize = 100;

/// The user-editable fields of a form submission.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FormField {
    FirstName,
    LastName,
}

impl FormField {
    pub const ALL: [FormField; 2] = [FormField::FirstName, FormField::LastName];

    /// JSON / wire key of the field.
    pub fn key(self) -> &'static str {
        match self {
            FormField::FirstName => "firstName",
            FormField::LastName => "lastName",
        }
    }

    /// Human-readable label used in messages.
    pub fn label(self) -> &'static str {
        match self {
            FormField::FirstName => "First name",
            FormField::LastName => "Last name",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }

    pub fn required_message(self) -> String {
        format!("{} is required.", self.label())
    }

    pub fn max_length_message(self) -> String {
        format!("{} must not exceed {NAME_MAX_LEN} characters.", self.label())
    }
}

/// Field-scoped validation failures: wire key -> messages, in rule order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// First message of the first field, if any.
    pub fn first_message(&self) -> Option<&str> {
        self.0.values().find_map(|msgs| msgs.first()).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn into_map(self) -> BTreeMap<String, Vec<String>> {
        self.0
    }
}

impl From<BTreeMap<String, Vec<String>>> for ValidationErrors {
    fn from(value: BTreeMap<String, Vec<String>>) -> Self {
        Self(value)
    }
}

impl core::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Body of `POST /forms`.
///
/// Both fields are optional on the wire so that a missing or `null` name is
/// reported as a validation failure rather than a malformed body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFormRequest {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl CreateFormRequest {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: Some(first_name.into()),
            last_name: Some(last_name.into()),
        }
    }

    pub fn field(&self, field: FormField) -> &str {
        let value = match field {
            FormField::FirstName => &self.first_name,
            FormField::LastName => &self.last_name,
        };
        value.as_deref().unwrap_or("")
    }

    /// Run every rule on every field and collect all failures.
    pub fn validate(&self) -> Result<NewForm, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        for field in FormField::ALL {
            for message in check_name(field, self.field(field)) {
                errors.add(field.key(), message);
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(NewForm::new(
            self.field(FormField::FirstName),
            self.field(FormField::LastName),
        ))
    }
}

/// Messages for one name value; empty when the value is acceptable.
///
/// Whitespace-only values count as empty. Rules do not short-circuit.
pub fn check_name(field: FormField, value: &str) -> Vec<String> {
    let mut messages = Vec::new();
    if value.trim().is_empty() {
        messages.push(field.required_message());
    }
    if value.chars().count() > NAME_MAX_LEN {
        messages.push(field.max_length_message());
    }
    messages
}

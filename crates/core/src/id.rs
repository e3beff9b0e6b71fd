//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a stored form submission.
///
/// Assigned by the repository on create; monotonically increasing and never
/// reused by the in-memory store. Postgres identity columns behave the same way.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormId(i32);

impl FormId {
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    pub const fn get(self) -> i32 {
        self.0
    }
}

impl core::fmt::Display for FormId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<i32> for FormId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl From<FormId> for i32 {
    fn from(value: FormId) -> Self {
        value.0
    }
}

impl FromStr for FormId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = i32::from_str(s.trim())
            .map_err(|e| DomainError::invalid_id(format!("FormId: {e}")))?;
        Ok(Self(value))
    }
}

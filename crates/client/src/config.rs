//! Client configuration and endpoint layout.

use myform_core::FormId;

pub const API_BASE_URL_VAR: &str = "MYFORM_API_BASE_URL";
pub const API_TOKEN_VAR: &str = "MYFORM_API_TOKEN";
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api/v1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub api_token: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_token: None,
        }
    }
}

impl ClientConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            api_token: None,
        }
    }

    pub fn from_env() -> Self {
        let get = |var: &str| std::env::var(var).ok().filter(|v| !v.trim().is_empty());
        Self {
            api_base_url: get(API_BASE_URL_VAR).unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            api_token: get(API_TOKEN_VAR),
        }
    }

    pub fn endpoints(&self) -> ApiEndpoints {
        ApiEndpoints::new(&self.api_base_url)
    }
}

/// Centralized endpoint URLs derived from the API base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoints {
    base_url: String,
}

impl ApiEndpoints {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List and create.
    pub fn forms(&self) -> String {
        format!("{}/forms", self.base_url)
    }

    /// Get and delete.
    pub fn form(&self, id: FormId) -> String {
        format!("{}/forms/{id}", self.base_url)
    }
}

//! Environment-driven server configuration.

use core::str::FromStr;
use std::net::SocketAddr;

use myform_observability::LogFormat;
use thiserror::Error;

pub const BIND_ADDR_VAR: &str = "MYFORM_BIND_ADDR";
pub const ENVIRONMENT_VAR: &str = "MYFORM_ENVIRONMENT";
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
pub const API_TOKEN_VAR: &str = "MYFORM_API_TOKEN";
pub const LOG_FORMAT_VAR: &str = "MYFORM_LOG_FORMAT";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {message}")]
    Invalid { var: &'static str, message: String },
}

/// Hosting environment. Development exposes raw diagnostics in 500 responses
/// and bootstraps the database schema on startup.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl Environment {
    pub fn is_development(self) -> bool {
        self == Environment::Development
    }
}

impl core::fmt::Display for Environment {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Environment::Development => f.write_str("development"),
            Environment::Production => f.write_str("production"),
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(format!("unknown environment `{other}`")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub environment: Environment,
    /// Postgres URL; the in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Static bearer token; the auth guard is inert when absent.
    pub api_token: Option<String>,
    pub log_format: LogFormat,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            environment: Environment::default(),
            database_url: None,
            api_token: None,
            log_format: LogFormat::default(),
        }
    }
}

impl ApiConfig {
    /// Read the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build a configuration from an arbitrary variable source.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Ok(Self {
            bind_addr: parse_or(get(BIND_ADDR_VAR), BIND_ADDR_VAR, defaults.bind_addr)?,
            environment: parse_or(get(ENVIRONMENT_VAR), ENVIRONMENT_VAR, defaults.environment)?,
            database_url: get(DATABASE_URL_VAR),
            api_token: get(API_TOKEN_VAR),
            log_format: parse_or(get(LOG_FORMAT_VAR), LOG_FORMAT_VAR, defaults.log_format)?,
        })
    }
}

fn parse_or<T>(raw: Option<String>, var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: core::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            message: e.to_string(),
        }),
    }
}

//! Composition root: pick a repository and wire the handlers behind the
//! [`FormService`] facade.

use std::sync::Arc;

use anyhow::Context;
use sqlx::PgPool;

use myform_infra::{FormApplicationService, FormService, InMemoryFormRepository, PostgresFormRepository};

use crate::config::ApiConfig;

pub async fn build_services(config: &ApiConfig) -> anyhow::Result<Arc<dyn FormService>> {
    match &config.database_url {
        Some(database_url) => build_postgres_services(config, database_url).await,
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory form store");
            Ok(in_memory_services())
        }
    }
}

/// In-memory wiring (dev/test).
pub fn in_memory_services() -> Arc<dyn FormService> {
    let repository = Arc::new(InMemoryFormRepository::new());
    Arc::new(FormApplicationService::new(repository))
}

async fn build_postgres_services(
    config: &ApiConfig,
    database_url: &str,
) -> anyhow::Result<Arc<dyn FormService>> {
    let pool = PgPool::connect(database_url)
        .await
        .context("failed to connect to Postgres")?;

    let repository = PostgresFormRepository::new(pool);
    if config.environment.is_development() {
        repository
            .ensure_schema()
            .await
            .context("failed to bootstrap forms schema")?;
    }

    tracing::info!("using Postgres form store");
    Ok(Arc::new(FormApplicationService::new(repository)))
}

//! Postgres-backed form store.
//!
//! Maps to the `forms` table. `id` is an identity column and `created_at`
//! defaults to `NOW()`, so both are assigned by the database and read back
//! with `RETURNING`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use myform_core::{Form, FormId, NewForm};

use super::{FormRepository, RepositoryResult};

/// Postgres-backed repository for form submissions.
///
/// Uses the SQLx connection pool, which is cheap to clone and thread-safe.
#[derive(Debug, Clone)]
pub struct PostgresFormRepository {
    pool: PgPool,
}

impl PostgresFormRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the `forms` table and its indexes if they are missing.
    pub async fn ensure_schema(&self) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS forms (
                id          INTEGER GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
                first_name  VARCHAR(100) NOT NULL,
                last_name   VARCHAR(100) NOT NULL,
                created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS ix_forms_created_at ON forms (created_at)")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS ix_forms_first_name_last_name ON forms (first_name, last_name)",
        )
        .execute(&self.pool)
        .await?;

        tracing::info!("forms schema ensured");
        Ok(())
    }
}

fn row_to_form(row: &PgRow) -> Result<Form, sqlx::Error> {
    Ok(Form {
        id: FormId::new(row.try_get::<i32, _>("id")?),
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
    })
}

#[async_trait]
impl FormRepository for PostgresFormRepository {
    async fn get_all(&self) -> RepositoryResult<Vec<Form>> {
        let rows = sqlx::query(
            r#"
            SELECT id, first_name, last_name, created_at
            FROM forms
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let forms = rows.iter().map(row_to_form).collect::<Result<Vec<_>, _>>()?;
        Ok(forms)
    }

    async fn get_by_id(&self, id: FormId) -> RepositoryResult<Option<Form>> {
        let row = sqlx::query(
            r#"
            SELECT id, first_name, last_name, created_at
            FROM forms
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(row_to_form).transpose()?)
    }

    async fn create(&self, form: NewForm) -> RepositoryResult<Form> {
        let row = sqlx::query(
            r#"
            INSERT INTO forms (first_name, last_name)
            VALUES ($1, $2)
            RETURNING id, first_name, last_name, created_at
            "#,
        )
        .bind(&form.first_name)
        .bind(&form.last_name)
        .fetch_one(&self.pool)
        .await?;

        Ok(row_to_form(&row)?)
    }

    async fn exists(&self, id: FormId) -> RepositoryResult<bool> {
        let found: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM forms WHERE id = $1)")
            .bind(id.get())
            .fetch_one(&self.pool)
            .await?;
        Ok(found)
    }

    async fn delete(&self, id: FormId) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM forms WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

//! PostgreSQL-backed store for the `projects` table.

use async_trait::async_trait;
use folio_core::project::Project;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};

use crate::error::DbError;
use crate::store::{decode_all, ensure_id, ProjectStore};

/// A raw document row.
#[derive(Debug, FromRow)]
struct ProjectRow {
    id: String,
    data: Json<serde_json::Value>,
}

impl ProjectRow {
    fn into_parts(self) -> (String, serde_json::Value) {
        (self.id, self.data.0)
    }
}

/// Stores each project as one JSONB document.
#[derive(Clone)]
pub struct PgProjectStore {
    pool: PgPool,
}

impl PgProjectStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectStore for PgProjectStore {
    async fn list(&self) -> Result<Vec<Project>, DbError> {
        let rows = sqlx::query_as::<_, ProjectRow>("SELECT id, data FROM projects ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(decode_all(rows.into_iter().map(ProjectRow::into_parts).collect()))
    }

    async fn get(&self, id: &str) -> Result<Option<Project>, DbError> {
        let row = sqlx::query_as::<_, ProjectRow>("SELECT id, data FROM projects WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let (id, data) = row.into_parts();
                Ok(Some(Project::from_document(&id, data)?))
            }
            None => Ok(None),
        }
    }

    async fn put(&self, project: &Project) -> Result<(), DbError> {
        ensure_id(project)?;
        sqlx::query(
            "INSERT INTO projects (id, data) VALUES ($1, $2)
             ON CONFLICT (id) DO UPDATE SET data = EXCLUDED.data, updated_at = NOW()",
        )
        .bind(&project.id)
        .bind(Json(project.to_document()))
        .execute(&self.pool)
        .await?;
        tracing::debug!(project_id = %project.id, "Project document written");
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> Result<(), DbError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }
}

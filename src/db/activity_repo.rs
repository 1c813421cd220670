// src/db/activity_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::activity::{ActivityListFilter, ActivityLog, NewActivity},
};

const ACTIVITY_COLUMNS: &str =
    "id, user_id, username, action, resource_type, resource_id, description, created_at";

// Trilha de auditoria: só INSERT e SELECT, nunca UPDATE/DELETE.
#[derive(Clone)]
pub struct ActivityRepository {
    pool: PgPool,
}

impl ActivityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Recebe o executor para participar da mesma transação da mutação
    // que está sendo auditada.
    pub async fn append<'e, E>(
        &self,
        executor: E,
        entry: &NewActivity<'_>,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO activity_logs
                (user_id, username, action, resource_type, resource_id, description)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(entry.user_id)
        .bind(entry.username)
        .bind(entry.action)
        .bind(entry.resource_type)
        .bind(entry.resource_id)
        .bind(&entry.description)
        .execute(executor)
        .await?;
        Ok(())
    }

    pub async fn list(&self, filter: &ActivityListFilter) -> Result<Vec<ActivityLog>, AppError> {
        // Teto de 200 entradas por página, padrão 50
        let limit = filter.limit.unwrap_or(50).clamp(1, 200);

        let logs = sqlx::query_as::<_, ActivityLog>(&format!(
            r#"
            SELECT {ACTIVITY_COLUMNS} FROM activity_logs
            WHERE ($1::text IS NULL OR resource_type = $1)
            ORDER BY created_at DESC
            LIMIT $2
            "#
        ))
        .bind(filter.resource_type.as_deref())
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(logs)
    }
}

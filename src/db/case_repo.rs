// src/db/case_repo.rs

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::cases::{Case, CaseListFilter, CaseStatus, CreateCasePayload, UpdateCasePayload},
};

const CASE_COLUMNS: &str = "id, client_name, process_number, description, status, start_date, \
     due_date, completed_date, data_entrega, assigned_to, created_by, created_at, updated_at";

#[derive(Clone)]
pub struct CaseRepository {
    pool: PgPool,
}

impl CaseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Listagem com filtros opcionais. Os binds nulos desligam a cláusula
    // correspondente, evitando montar SQL dinâmico.
    pub async fn list(&self, filter: &CaseListFilter) -> Result<Vec<Case>, AppError> {
        let cases = sqlx::query_as::<_, Case>(&format!(
            r#"
            SELECT {CASE_COLUMNS} FROM cases
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::text IS NULL
                   OR client_name ILIKE '%' || $2 || '%'
                   OR process_number ILIKE '%' || $2 || '%')
              AND ($3::uuid IS NULL OR assigned_to = $3)
            ORDER BY created_at DESC
            "#
        ))
        .bind(filter.status.map(|s| s.as_str()))
        .bind(filter.q.as_deref())
        .bind(filter.assigned_to)
        .fetch_all(&self.pool)
        .await?;
        Ok(cases)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Case>, AppError> {
        let maybe_case = sqlx::query_as::<_, Case>(&format!(
            "SELECT {CASE_COLUMNS} FROM cases WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_case)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        payload: &CreateCasePayload,
        created_by: Uuid,
    ) -> Result<Case, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let case = sqlx::query_as::<_, Case>(&format!(
            r#"
            INSERT INTO cases
                (client_name, process_number, description, start_date, due_date,
                 assigned_to, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {CASE_COLUMNS}
            "#
        ))
        .bind(&payload.client_name)
        .bind(&payload.process_number)
        .bind(payload.description.as_deref())
        .bind(payload.start_date)
        .bind(payload.due_date)
        .bind(payload.assigned_to)
        .bind(created_by)
        .fetch_one(executor)
        .await
        .map_err(map_unique_violation)?;

        Ok(case)
    }

    // Atualização parcial dos campos editáveis. Status fica de fora:
    // a transição tem caminho próprio (update_status).
    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        payload: &UpdateCasePayload,
    ) -> Result<Option<Case>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let maybe_case = sqlx::query_as::<_, Case>(&format!(
            r#"
            UPDATE cases SET
                client_name = COALESCE($2, client_name),
                process_number = COALESCE($3, process_number),
                description = COALESCE($4, description),
                start_date = COALESCE($5, start_date),
                due_date = COALESCE($6, due_date),
                assigned_to = COALESCE($7, assigned_to),
                updated_at = now()
            WHERE id = $1
            RETURNING {CASE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(payload.client_name.as_deref())
        .bind(payload.process_number.as_deref())
        .bind(payload.description.as_deref())
        .bind(payload.start_date)
        .bind(payload.due_date)
        .bind(payload.assigned_to)
        .fetch_optional(executor)
        .await
        .map_err(map_unique_violation)?;

        Ok(maybe_case)
    }

    // Grava o status e as datas de conclusão já decididos pela regra de
    // transição. Última escrita vence em caso de corrida (sem lock otimista).
    pub async fn update_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: CaseStatus,
        completed_date: Option<DateTime<Utc>>,
        data_entrega: Option<DateTime<Utc>>,
    ) -> Result<Option<Case>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let maybe_case = sqlx::query_as::<_, Case>(&format!(
            r#"
            UPDATE cases SET
                status = $2,
                completed_date = $3,
                data_entrega = $4,
                updated_at = now()
            WHERE id = $1
            RETURNING {CASE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(status)
        .bind(completed_date)
        .bind(data_entrega)
        .fetch_optional(executor)
        .await?;

        Ok(maybe_case)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM cases WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // Processos abertos com vencimento até hoje + dias. Os já vencidos
    // entram também: aparecem no painel como atrasados.
    pub async fn upcoming_deadlines(
        &self,
        today: NaiveDate,
        days: i64,
    ) -> Result<Vec<Case>, AppError> {
        let until = today + chrono::Duration::days(days);
        let cases = sqlx::query_as::<_, Case>(&format!(
            r#"
            SELECT {CASE_COLUMNS} FROM cases
            WHERE status <> 'concluido'
              AND due_date IS NOT NULL
              AND due_date <= $1
            ORDER BY due_date ASC
            "#
        ))
        .bind(until)
        .fetch_all(&self.pool)
        .await?;
        Ok(cases)
    }
}

fn map_unique_violation(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() && db_err.constraint() == Some("cases_process_number_key") {
            return AppError::ProcessNumberAlreadyExists;
        }
    }
    e.into()
}

// src/db/employee_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::employees::{
        CreateEmployeePayload, Employee, EmployeeListFilter, UpdateEmployeePayload,
    },
};

const EMPLOYEE_COLUMNS: &str = "id, matricula, full_name, cpf, rg, cargo, salary, cost_center, \
     status, created_at, updated_at";

#[derive(Clone)]
pub struct EmployeeRepository {
    pool: PgPool,
}

impl EmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Por padrão esconde os registros com exclusão lógica.
    pub async fn list(&self, filter: &EmployeeListFilter) -> Result<Vec<Employee>, AppError> {
        let employees = sqlx::query_as::<_, Employee>(&format!(
            r#"
            SELECT {EMPLOYEE_COLUMNS} FROM employees
            WHERE ($1 OR status <> 'deletado')
              AND ($2::text IS NULL
                   OR matricula ILIKE '%' || $2 || '%'
                   OR full_name ILIKE '%' || $2 || '%')
            ORDER BY full_name
            "#
        ))
        .bind(filter.include_deleted)
        .bind(filter.q.as_deref())
        .fetch_all(&self.pool)
        .await?;
        Ok(employees)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>, AppError> {
        let maybe_employee = sqlx::query_as::<_, Employee>(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_employee)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        payload: &CreateEmployeePayload,
    ) -> Result<Employee, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let employee = sqlx::query_as::<_, Employee>(&format!(
            r#"
            INSERT INTO employees (matricula, full_name, cpf, rg, cargo, salary, cost_center)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {EMPLOYEE_COLUMNS}
            "#
        ))
        .bind(&payload.matricula)
        .bind(&payload.full_name)
        .bind(payload.cpf.as_deref())
        .bind(payload.rg.as_deref())
        .bind(payload.cargo.as_deref())
        .bind(payload.salary)
        .bind(payload.cost_center.as_deref())
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::MatriculaAlreadyExists;
                }
            }
            e.into()
        })?;

        Ok(employee)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        payload: &UpdateEmployeePayload,
    ) -> Result<Option<Employee>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let maybe_employee = sqlx::query_as::<_, Employee>(&format!(
            r#"
            UPDATE employees SET
                full_name = COALESCE($2, full_name),
                cpf = COALESCE($3, cpf),
                rg = COALESCE($4, rg),
                cargo = COALESCE($5, cargo),
                salary = COALESCE($6, salary),
                cost_center = COALESCE($7, cost_center),
                updated_at = now()
            WHERE id = $1 AND status <> 'deletado'
            RETURNING {EMPLOYEE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(payload.full_name.as_deref())
        .bind(payload.cpf.as_deref())
        .bind(payload.rg.as_deref())
        .bind(payload.cargo.as_deref())
        .bind(payload.salary)
        .bind(payload.cost_center.as_deref())
        .fetch_optional(executor)
        .await?;

        Ok(maybe_employee)
    }

    // Exclusão lógica: marca 'deletado' em vez de remover a linha.
    pub async fn soft_delete<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            "UPDATE employees SET status = 'deletado', updated_at = now() \
             WHERE id = $1 AND status <> 'deletado'",
        )
        .bind(id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

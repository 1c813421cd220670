// src/db/dashboard_repo.rs

use chrono::NaiveDate;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::dashboard::{CasesByStatusEntry, DashboardSummary},
};

#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Resumo dos cards. Uma transação só, para um snapshot consistente
    // entre as contagens.
    pub async fn get_summary(&self, today: NaiveDate) -> Result<DashboardSummary, AppError> {
        let mut tx = self.pool.begin().await?;

        let (total_cases, novos, em_andamento, pendentes, concluidos): (i64, i64, i64, i64, i64) =
            sqlx::query_as(
                r#"
                SELECT
                    COUNT(*),
                    COUNT(*) FILTER (WHERE status = 'novo'),
                    COUNT(*) FILTER (WHERE status = 'andamento'),
                    COUNT(*) FILTER (WHERE status = 'pendente'),
                    COUNT(*) FILTER (WHERE status = 'concluido')
                FROM cases
                "#,
            )
            .fetch_one(&mut *tx)
            .await?;

        // "Atrasado" depende do hoje da requisição; nunca fica gravado.
        let atrasados = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM cases WHERE status <> 'concluido' \
             AND due_date IS NOT NULL AND due_date < $1",
        )
        .bind(today)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(DashboardSummary {
            total_cases,
            novos,
            em_andamento,
            pendentes,
            concluidos,
            atrasados,
        })
    }

    pub async fn cases_by_status(&self) -> Result<Vec<CasesByStatusEntry>, AppError> {
        let entries = sqlx::query_as::<_, CasesByStatusEntry>(
            "SELECT status, COUNT(*) AS total FROM cases GROUP BY status ORDER BY total DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }
}

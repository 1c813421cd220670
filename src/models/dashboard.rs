// src/models/dashboard.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::cases::{Bucket, CaseStatus};

// 1. Resumo (os cards do topo do painel)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_cases: i64,
    pub novos: i64,
    pub em_andamento: i64,
    pub pendentes: i64,
    pub concluidos: i64,
    // Calculado contra o "hoje" da requisição, nunca armazenado
    pub atrasados: i64,
}

// 2. Gráfico de processos por status
#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CasesByStatusEntry {
    pub status: CaseStatus,
    pub total: i64,
}

// 3. Próximos prazos (processos abertos com vencimento na janela)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeadlineEntry {
    pub id: Uuid,
    pub client_name: String,
    pub process_number: String,
    pub status: CaseStatus,

    #[schema(value_type = String, format = Date)]
    pub due_date: NaiveDate,

    pub bucket: Bucket,
}

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct DeadlineQuery {
    /// Janela em dias à frente (padrão 7)
    pub days: Option<i64>,
}

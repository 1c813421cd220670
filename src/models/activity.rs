// src/models/activity.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// Tipo da ação registrada na trilha de auditoria
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum ActivityAction {
    Create,
    Update,
    Delete,
    StatusChange,
}

// Uma entrada imutável da trilha de auditoria
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLog {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub username: String,
    pub action: ActivityAction,
    pub resource_type: String,
    pub resource_id: Option<Uuid>,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

// Dados de uma nova entrada, montados pelos serviços (nunca vem do cliente)
#[derive(Debug)]
pub struct NewActivity<'a> {
    pub user_id: Option<Uuid>,
    pub username: &'a str,
    pub action: ActivityAction,
    pub resource_type: &'a str,
    pub resource_id: Option<Uuid>,
    pub description: String,
}

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ActivityListFilter {
    /// Quantidade máxima de entradas (padrão 50, teto 200)
    pub limit: Option<i64>,
    pub resource_type: Option<String>,
}

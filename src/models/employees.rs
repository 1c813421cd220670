// src/models/employees.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Funcionários nunca são removidos fisicamente: a exclusão marca 'deletado'.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum EmployeeStatus {
    Ativo,
    Deletado,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: Uuid,
    pub matricula: String,
    pub full_name: String,
    pub cpf: Option<String>,
    pub rg: Option<String>,
    pub cargo: Option<String>,

    #[schema(value_type = Option<f64>, example = 4500.00)]
    pub salary: Option<Decimal>,

    pub cost_center: Option<String>,
    pub status: EmployeeStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeePayload {
    #[validate(length(min = 1, message = "A matrícula é obrigatória"))]
    #[schema(example = "F-00042")]
    pub matricula: String,

    #[validate(length(min = 1, message = "O nome é obrigatório"))]
    #[schema(example = "João Pereira")]
    pub full_name: String,

    #[schema(example = "123.456.789-00")]
    pub cpf: Option<String>,
    pub rg: Option<String>,

    #[schema(example = "Advogado Júnior")]
    pub cargo: Option<String>,

    #[schema(value_type = Option<f64>, example = 4500.00)]
    pub salary: Option<Decimal>,

    #[schema(example = "CC-CONTENCIOSO")]
    pub cost_center: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeePayload {
    #[validate(length(min = 1, message = "O nome não pode ficar vazio"))]
    pub full_name: Option<String>,

    pub cpf: Option<String>,
    pub rg: Option<String>,
    pub cargo: Option<String>,

    #[schema(value_type = Option<f64>)]
    pub salary: Option<Decimal>,

    pub cost_center: Option<String>,
}

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeListFilter {
    /// Busca livre sobre matrícula e nome
    pub q: Option<String>,

    /// Inclui registros com exclusão lógica
    #[serde(default)]
    pub include_deleted: bool,
}

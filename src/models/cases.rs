// src/models/cases.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Status de um processo jurídico, persistido como TEXT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum CaseStatus {
    Novo,
    Andamento,
    Concluido,
    Pendente,
}

// Classificação de urgência derivada de (status, prazo). Nunca é persistida:
// depende do "hoje" e precisa ser recalculada a cada requisição.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Novo,
    Pendente,
    Atrasado,
    Concluido,
}

// Representa um processo vindo do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    pub id: Uuid,
    pub client_name: String,
    pub process_number: String,
    pub description: Option<String>,
    pub status: CaseStatus,
    pub start_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    // Invariante: preenchidos se e somente se status == concluido
    pub completed_date: Option<DateTime<Utc>>,
    pub data_entrega: Option<DateTime<Utc>>,
    pub assigned_to: Option<Uuid>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Processo acompanhado do bucket calculado no momento da requisição
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CaseWithBucket {
    #[serde(flatten)]
    pub case: Case,
    pub bucket: Bucket,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCasePayload {
    #[validate(length(min = 1, message = "O nome do cliente é obrigatório"))]
    #[schema(example = "Maria da Silva")]
    pub client_name: String,

    #[validate(length(min = 1, message = "O número do processo é obrigatório"))]
    #[schema(example = "0001234-56.2024.8.26.0100")]
    pub process_number: String,

    pub description: Option<String>,

    #[schema(value_type = String, format = Date, example = "2024-03-01")]
    pub start_date: NaiveDate,

    #[schema(value_type = Option<String>, format = Date, example = "2024-06-30")]
    pub due_date: Option<NaiveDate>,

    pub assigned_to: Option<Uuid>,
}

// Atualização parcial. O status tem endpoint próprio (PATCH /{id}/status),
// então é ignorado aqui.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCasePayload {
    #[validate(length(min = 1, message = "O nome do cliente não pode ficar vazio"))]
    pub client_name: Option<String>,

    #[validate(length(min = 1, message = "O número do processo não pode ficar vazio"))]
    pub process_number: Option<String>,

    pub description: Option<String>,

    #[schema(value_type = Option<String>, format = Date)]
    pub start_date: Option<NaiveDate>,

    #[schema(value_type = Option<String>, format = Date)]
    pub due_date: Option<NaiveDate>,

    pub assigned_to: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCaseStatusPayload {
    #[schema(example = "concluido")]
    pub status: CaseStatus,
}

// Filtros da listagem (query string)
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct CaseListFilter {
    pub status: Option<CaseStatus>,
    /// Busca livre sobre nome do cliente e número do processo
    pub q: Option<String>,
    pub assigned_to: Option<Uuid>,
}

impl CaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseStatus::Novo => "novo",
            CaseStatus::Andamento => "andamento",
            CaseStatus::Concluido => "concluido",
            CaseStatus::Pendente => "pendente",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // O front e o banco dependem das formas minúsculas exatas.
    #[test]
    fn status_serializa_em_minusculas() {
        for (status, wire) in [
            (CaseStatus::Novo, "\"novo\""),
            (CaseStatus::Andamento, "\"andamento\""),
            (CaseStatus::Concluido, "\"concluido\""),
            (CaseStatus::Pendente, "\"pendente\""),
        ] {
            assert_eq!(serde_json::to_string(&status).unwrap(), wire);
            assert_eq!(serde_json::from_str::<CaseStatus>(wire).unwrap(), status);
        }
    }

    #[test]
    fn status_as_str_casa_com_o_json() {
        for status in [
            CaseStatus::Novo,
            CaseStatus::Andamento,
            CaseStatus::Concluido,
            CaseStatus::Pendente,
        ] {
            let wire = serde_json::to_string(&status).unwrap();
            assert_eq!(wire, format!("\"{}\"", status.as_str()));
        }
    }

    #[test]
    fn bucket_serializa_em_minusculas() {
        for (bucket, wire) in [
            (Bucket::Novo, "\"novo\""),
            (Bucket::Pendente, "\"pendente\""),
            (Bucket::Atrasado, "\"atrasado\""),
            (Bucket::Concluido, "\"concluido\""),
        ] {
            assert_eq!(serde_json::to_string(&bucket).unwrap(), wire);
        }
    }
}

// src/common/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::models::cases::CaseStatus;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Nome de usuário já existe")]
    UsernameAlreadyExists,

    #[error("Matrícula já existe")]
    MatriculaAlreadyExists,

    #[error("Número de processo já existe")]
    ProcessNumberAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Processo não encontrado")]
    CaseNotFound,

    #[error("Funcionário não encontrado")]
    EmployeeNotFound,

    // 403 genérico: o papel do usuário não cobre a operação
    #[error("Permissão insuficiente")]
    Forbidden,

    // 403 específico da regra de transição de status, com código próprio
    // para o cliente distinguir de falta de papel
    #[error("Transição de status não permitida: {from:?} -> {to:?}")]
    TransitionNotAllowed { from: CaseStatus, to: CaseStatus },

    // 403 de edição campo a campo: o payload tocou um campo que o perfil
    // do usuário não pode alterar
    #[error("Campo não editável para o perfil: {field}")]
    FieldNotEditable { field: &'static str },

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            // Corpo estruturado: o front usa o `code` para exibir a mensagem
            // certa sem adivinhar a partir do texto.
            AppError::TransitionNotAllowed { from, to } => {
                let body = Json(json!({
                    "error": "Seu perfil não permite mover o processo para este status.",
                    "code": "transition_not_allowed",
                    "details": { "from": from, "to": to },
                }));
                return (StatusCode::FORBIDDEN, body).into_response();
            }

            AppError::FieldNotEditable { field } => {
                let body = Json(json!({
                    "error": "Seu perfil não permite alterar este campo do processo.",
                    "code": "field_not_editable",
                    "details": { "field": field },
                }));
                return (StatusCode::FORBIDDEN, body).into_response();
            }

            AppError::EmailAlreadyExists => (StatusCode::CONFLICT, "Este e-mail já está em uso."),
            AppError::UsernameAlreadyExists => {
                (StatusCode::CONFLICT, "Este nome de usuário já está em uso.")
            }
            AppError::MatriculaAlreadyExists => {
                (StatusCode::CONFLICT, "Esta matrícula já está cadastrada.")
            }
            AppError::ProcessNumberAlreadyExists => {
                (StatusCode::CONFLICT, "Este número de processo já está cadastrado.")
            }
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "E-mail ou senha inválidos.")
            }
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticação inválido ou ausente.",
            ),
            AppError::UserNotFound => (StatusCode::NOT_FOUND, "Usuário não encontrado."),
            AppError::CaseNotFound => (StatusCode::NOT_FOUND, "Processo não encontrado."),
            AppError::EmployeeNotFound => (StatusCode::NOT_FOUND, "Funcionário não encontrado."),
            AppError::Forbidden => (
                StatusCode::FORBIDDEN,
                "Você não tem permissão para realizar esta ação.",
            ),

            // Todos os outros erros (DatabaseError, InternalServerError) viram 500.
            // O `tracing` loga a mensagem detalhada; o cliente recebe só o genérico.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.")
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

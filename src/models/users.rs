// src/models/users.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Papel do usuário na aplicação, persistido como TEXT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Editor,
    Viewer,
}

// Overrides de transição por usuário. Cada flag presente substitui o padrão
// do papel; as ausentes herdam o padrão. Casos individuais viram dados,
// nunca condicionais por nome de usuário na regra.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransitionOverrides {
    pub novo: Option<bool>,
    pub andamento: Option<bool>,
    pub pendente: Option<bool>,
    pub concluido: Option<bool>,
}

// Overrides de edição campo a campo nos processos. Mesma mecânica dos
// overrides de transição: flag presente substitui o padrão do papel.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CaseFieldOverrides {
    pub client_name: Option<bool>,
    pub process_number: Option<bool>,
    pub description: Option<bool>,
    pub start_date: Option<bool>,
    pub due_date: Option<bool>,
    pub assigned_to: Option<bool>,
}

// Mapa de permissões guardado na coluna JSONB `users.permissions`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPermissions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transitions: Option<TransitionOverrides>,

    /// Direitos de edição por campo nos processos
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_fields: Option<CaseFieldOverrides>,

    /// Visibilidade por página do SPA (slug -> visível)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<std::collections::HashMap<String, bool>>,
}

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    pub password_hash: String,

    pub role: Role,

    #[schema(value_type = UserPermissions)]
    pub permissions: sqlx::types::Json<UserPermissions>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserPayload {
    #[validate(length(min = 3, message = "O nome de usuário deve ter no mínimo 3 caracteres"))]
    #[schema(example = "ana.costa")]
    pub username: String,

    #[validate(email(message = "O e-mail fornecido é inválido"))]
    #[schema(example = "ana@escritorio.com.br")]
    pub email: String,

    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres"))]
    pub password: String,

    pub role: Role,

    pub permissions: Option<UserPermissions>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserPayload {
    #[validate(email(message = "O e-mail fornecido é inválido"))]
    pub email: Option<String>,

    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres"))]
    pub password: Option<String>,

    pub role: Option<Role>,

    pub permissions: Option<UserPermissions>,
}

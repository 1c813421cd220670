// src/middleware/rbac.rs

use axum::{extract::FromRequestParts, http::request::Parts};
use std::marker::PhantomData;

use crate::{common::error::AppError, models::users::{Role, User}};

/// 1. O Trait que define o que é uma Permissão
pub trait PermissionDef: Send + Sync + 'static {
    fn slug() -> &'static str;
}

/// 2. O Extractor (Guardião). Resolve a permissão em memória a partir do
/// papel do usuário já carregado pelo auth_guard, sem ida ao banco.
pub struct RequirePermission<T>(pub PhantomData<T>);

impl<T, S> FromRequestParts<S> for RequirePermission<T>
where
    T: PermissionDef,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts.extensions.get::<User>().ok_or(AppError::InvalidToken)?;

        if !role_allows(user.role, T::slug()) {
            tracing::warn!(
                "🚫 Usuário '{}' ({:?}) sem a permissão '{}'",
                user.username,
                user.role,
                T::slug()
            );
            return Err(AppError::Forbidden);
        }

        Ok(RequirePermission(PhantomData))
    }
}

// Mapa papel -> permissões. Admin pode tudo; editor escreve em processos e
// funcionários; viewer só lê.
fn role_allows(role: Role, slug: &str) -> bool {
    match role {
        Role::Admin => true,
        Role::Editor => matches!(slug, "cases:write" | "employees:write"),
        Role::Viewer => false,
    }
}

// ---
// DEFINIÇÃO DAS PERMISSÕES (TIPOS)
// ---

pub struct PermCasesWrite;
impl PermissionDef for PermCasesWrite {
    fn slug() -> &'static str { "cases:write" }
}

pub struct PermCasesDelete;
impl PermissionDef for PermCasesDelete {
    fn slug() -> &'static str { "cases:delete" }
}

pub struct PermEmployeesWrite;
impl PermissionDef for PermEmployeesWrite {
    fn slug() -> &'static str { "employees:write" }
}

pub struct PermEmployeesDelete;
impl PermissionDef for PermEmployeesDelete {
    fn slug() -> &'static str { "employees:delete" }
}

pub struct PermUsersManage;
impl PermissionDef for PermUsersManage {
    fn slug() -> &'static str { "users:manage" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_tem_todas_as_permissoes() {
        for slug in ["cases:write", "cases:delete", "employees:write", "users:manage"] {
            assert!(role_allows(Role::Admin, slug));
        }
    }

    #[test]
    fn editor_escreve_mas_nao_exclui_nem_administra() {
        assert!(role_allows(Role::Editor, "cases:write"));
        assert!(role_allows(Role::Editor, "employees:write"));
        assert!(!role_allows(Role::Editor, "cases:delete"));
        assert!(!role_allows(Role::Editor, "employees:delete"));
        assert!(!role_allows(Role::Editor, "users:manage"));
    }

    #[test]
    fn viewer_nao_tem_permissao_de_escrita() {
        assert!(!role_allows(Role::Viewer, "cases:write"));
        assert!(!role_allows(Role::Viewer, "users:manage"));
    }
}

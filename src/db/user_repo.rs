// src/db/user_repo.rs

use sqlx::{Executor, PgPool, Postgres, types::Json};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::users::{Role, User, UserPermissions},
};

const USER_COLUMNS: &str =
    "id, username, email, password_hash, role, permissions, created_at, updated_at";

// Chave do advisory lock de registro de contas ("JURI" em ASCII)
const REGISTRATION_LOCK_KEY: i64 = 0x4a55_5249;

// O repositório de usuários, responsável por todas as interações com a tabela 'users'
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_user)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_user)
    }

    pub async fn list(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY username"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    // A contagem participa da transação de registro: fora dela, duas
    // primeiras contas simultâneas poderiam ambas ler zero.
    pub async fn count<'e, E>(&self, executor: E) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(executor)
            .await?;
        Ok(total)
    }

    // Advisory lock transacional que serializa os registros de conta.
    // Liberado automaticamente no commit/rollback.
    pub async fn acquire_registration_lock<'e, E>(&self, executor: E) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(REGISTRATION_LOCK_KEY)
            .execute(executor)
            .await?;
        Ok(())
    }

    // Cria um novo usuário, com tratamento específico para duplicidade
    // de e-mail e de nome de usuário.
    pub async fn create<'e, E>(
        &self,
        executor: E,
        username: &str,
        email: &str,
        password_hash: &str,
        role: Role,
        permissions: &UserPermissions,
    ) -> Result<User, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (username, email, password_hash, role, permissions)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .bind(Json(permissions))
        .fetch_one(executor)
        .await
        .map_err(map_unique_violation)?;

        Ok(user)
    }

    // Atualização parcial: campos nulos preservam o valor atual.
    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        email: Option<&str>,
        password_hash: Option<&str>,
        role: Option<Role>,
        permissions: Option<&UserPermissions>,
    ) -> Result<Option<User>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let maybe_user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users SET
                email = COALESCE($2, email),
                password_hash = COALESCE($3, password_hash),
                role = COALESCE($4, role),
                permissions = COALESCE($5, permissions),
                updated_at = now()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .bind(permissions.map(Json))
        .fetch_optional(executor)
        .await
        .map_err(map_unique_violation)?;

        Ok(maybe_user)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn map_unique_violation(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return match db_err.constraint() {
                Some("users_email_key") => AppError::EmailAlreadyExists,
                Some("users_username_key") => AppError::UsernameAlreadyExists,
                _ => e.into(),
            };
        }
    }
    e.into()
}

// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ActivityRepository, UserRepository},
    models::{
        activity::{ActivityAction, NewActivity},
        auth::Claims,
        users::{Role, User, UserPermissions},
    },
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    activity_repo: ActivityRepository,
    jwt_secret: String,
    pool: PgPool,
}

impl AuthService {
    pub fn new(
        user_repo: UserRepository,
        activity_repo: ActivityRepository,
        jwt_secret: String,
        pool: PgPool,
    ) -> Self {
        Self { user_repo, activity_repo, jwt_secret, pool }
    }

    pub async fn register_user(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<String, AppError> {
        // 1. Hashing fora do runtime assíncrono (bcrypt é caro)
        let password_clone = password.to_owned();
        let hashed_password =
            tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        // 2. Decisão de papel, criação do usuário e auditoria na mesma
        // transação. O advisory lock serializa registros concorrentes:
        // sem ele, duas primeiras contas poderiam ambas ler contagem zero
        // e nascer admin.
        let mut tx = self.pool.begin().await?;

        self.user_repo.acquire_registration_lock(&mut *tx).await?;
        let role = bootstrap_role(self.user_repo.count(&mut *tx).await?);

        let new_user = self
            .user_repo
            .create(
                &mut *tx,
                username,
                email,
                &hashed_password,
                role,
                &UserPermissions::default(),
            )
            .await?;

        self.activity_repo
            .append(
                &mut *tx,
                &NewActivity {
                    user_id: Some(new_user.id),
                    username: &new_user.username,
                    action: ActivityAction::Create,
                    resource_type: "user",
                    resource_id: Some(new_user.id),
                    description: format!("Registrou a conta '{}'", new_user.username),
                },
            )
            .await?;

        tx.commit().await?;

        tracing::info!("✅ Novo usuário registrado: {} ({:?})", new_user.username, role);

        // 3. Gera o token
        self.create_token(new_user.id)
    }

    pub async fn login_user(&self, email: &str, password: &str) -> Result<String, AppError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid =
            tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        self.create_token(user.id)
    }

    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        self.user_repo
            .find_by_id(token_data.claims.sub)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    fn create_token(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(7);

        let claims = Claims {
            sub: user_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}

// A primeira conta do sistema vira admin; as seguintes nascem viewer e são
// promovidas por um admin em /api/users.
fn bootstrap_role(existing_users: i64) -> Role {
    if existing_users == 0 {
        Role::Admin
    } else {
        Role::Viewer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primeira_conta_vira_admin() {
        assert_eq!(bootstrap_role(0), Role::Admin);
    }

    #[test]
    fn contas_seguintes_nascem_viewer() {
        // Inclusive na corrida: o segundo registro, serializado pelo lock,
        // conta o admin já commitado e cai aqui.
        assert_eq!(bootstrap_role(1), Role::Viewer);
        assert_eq!(bootstrap_role(42), Role::Viewer);
    }
}

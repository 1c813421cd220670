// src/services/user_service.rs

use bcrypt::hash;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ActivityRepository, UserRepository},
    models::{
        activity::{ActivityAction, NewActivity},
        users::{CreateUserPayload, UpdateUserPayload, User, UserPermissions},
    },
};

#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
    activity_repo: ActivityRepository,
    pool: PgPool,
}

impl UserService {
    pub fn new(user_repo: UserRepository, activity_repo: ActivityRepository, pool: PgPool) -> Self {
        Self { user_repo, activity_repo, pool }
    }

    pub async fn list(&self) -> Result<Vec<User>, AppError> {
        self.user_repo.list().await
    }

    pub async fn get(&self, id: Uuid) -> Result<User, AppError> {
        self.user_repo.find_by_id(id).await?.ok_or(AppError::UserNotFound)
    }

    pub async fn create(
        &self,
        payload: &CreateUserPayload,
        actor: &User,
    ) -> Result<User, AppError> {
        let hashed_password = hash_password(payload.password.clone()).await?;
        let permissions = payload.permissions.clone().unwrap_or_else(UserPermissions::default);

        let mut tx = self.pool.begin().await?;

        let user = self
            .user_repo
            .create(
                &mut *tx,
                &payload.username,
                &payload.email,
                &hashed_password,
                payload.role,
                &permissions,
            )
            .await?;

        self.activity_repo
            .append(
                &mut *tx,
                &NewActivity {
                    user_id: Some(actor.id),
                    username: &actor.username,
                    action: ActivityAction::Create,
                    resource_type: "user",
                    resource_id: Some(user.id),
                    description: format!(
                        "Criou o usuário '{}' com papel {:?}",
                        user.username, user.role
                    ),
                },
            )
            .await?;

        tx.commit().await?;
        Ok(user)
    }

    pub async fn update(
        &self,
        id: Uuid,
        payload: &UpdateUserPayload,
        actor: &User,
    ) -> Result<User, AppError> {
        // Re-hash apenas quando uma nova senha foi enviada
        let hashed_password = match &payload.password {
            Some(password) => Some(hash_password(password.clone()).await?),
            None => None,
        };

        let mut tx = self.pool.begin().await?;

        let user = self
            .user_repo
            .update(
                &mut *tx,
                id,
                payload.email.as_deref(),
                hashed_password.as_deref(),
                payload.role,
                payload.permissions.as_ref(),
            )
            .await?
            .ok_or(AppError::UserNotFound)?;

        self.activity_repo
            .append(
                &mut *tx,
                &NewActivity {
                    user_id: Some(actor.id),
                    username: &actor.username,
                    action: ActivityAction::Update,
                    resource_type: "user",
                    resource_id: Some(user.id),
                    description: format!("Atualizou o usuário '{}'", user.username),
                },
            )
            .await?;

        tx.commit().await?;
        Ok(user)
    }

    pub async fn delete(&self, id: Uuid, actor: &User) -> Result<(), AppError> {
        let user = self.user_repo.find_by_id(id).await?.ok_or(AppError::UserNotFound)?;

        let mut tx = self.pool.begin().await?;

        self.user_repo.delete(&mut *tx, id).await?;

        self.activity_repo
            .append(
                &mut *tx,
                &NewActivity {
                    user_id: Some(actor.id),
                    username: &actor.username,
                    action: ActivityAction::Delete,
                    resource_type: "user",
                    resource_id: Some(id),
                    description: format!("Excluiu o usuário '{}'", user.username),
                },
            )
            .await?;

        tx.commit().await?;
        Ok(())
    }
}

async fn hash_password(password: String) -> Result<String, AppError> {
    let hashed = tokio::task::spawn_blocking(move || hash(&password, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
    Ok(hashed)
}

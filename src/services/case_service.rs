// src/services/case_service.rs

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ActivityRepository, CaseRepository},
    models::{
        activity::{ActivityAction, NewActivity},
        cases::{
            Case, CaseListFilter, CaseStatus, CaseWithBucket, CreateCasePayload,
            UpdateCasePayload,
        },
        users::User,
    },
    services::case_rules,
};

#[derive(Clone)]
pub struct CaseService {
    case_repo: CaseRepository,
    activity_repo: ActivityRepository,
    pool: PgPool,
}

impl CaseService {
    pub fn new(case_repo: CaseRepository, activity_repo: ActivityRepository, pool: PgPool) -> Self {
        Self { case_repo, activity_repo, pool }
    }

    // Listagem com o bucket calculado contra o "hoje" da requisição
    pub async fn list(&self, filter: &CaseListFilter) -> Result<Vec<CaseWithBucket>, AppError> {
        let today = Utc::now().date_naive();
        let cases = self.case_repo.list(filter).await?;
        Ok(cases.into_iter().map(|c| with_bucket(c, today)).collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<CaseWithBucket, AppError> {
        let today = Utc::now().date_naive();
        let case = self.case_repo.find_by_id(id).await?.ok_or(AppError::CaseNotFound)?;
        Ok(with_bucket(case, today))
    }

    pub async fn create(
        &self,
        payload: &CreateCasePayload,
        actor: &User,
    ) -> Result<Case, AppError> {
        let mut tx = self.pool.begin().await?;

        let case = self.case_repo.create(&mut *tx, payload, actor.id).await?;

        self.activity_repo
            .append(
                &mut *tx,
                &NewActivity {
                    user_id: Some(actor.id),
                    username: &actor.username,
                    action: ActivityAction::Create,
                    resource_type: "case",
                    resource_id: Some(case.id),
                    description: format!(
                        "Cadastrou o processo {} ({})",
                        case.process_number, case.client_name
                    ),
                },
            )
            .await?;

        tx.commit().await?;
        Ok(case)
    }

    pub async fn update(
        &self,
        id: Uuid,
        payload: &UpdateCasePayload,
        actor: &User,
    ) -> Result<Case, AppError> {
        // Edição campo a campo: o papel (mais overrides do usuário) decide
        // quais campos do processo podem ser tocados neste PATCH
        let field_perms = case_rules::field_permissions_for(actor);
        case_rules::check_field_edits(payload, &field_perms)?;

        let mut tx = self.pool.begin().await?;

        let case = self
            .case_repo
            .update(&mut *tx, id, payload)
            .await?
            .ok_or(AppError::CaseNotFound)?;

        self.activity_repo
            .append(
                &mut *tx,
                &NewActivity {
                    user_id: Some(actor.id),
                    username: &actor.username,
                    action: ActivityAction::Update,
                    resource_type: "case",
                    resource_id: Some(case.id),
                    description: format!("Atualizou o processo {}", case.process_number),
                },
            )
            .await?;

        tx.commit().await?;
        Ok(case)
    }

    // Transição de status: valida a permissão do usuário, calcula o efeito
    // sobre as datas de conclusão e grava tudo junto com a auditoria.
    pub async fn change_status(
        &self,
        id: Uuid,
        target: CaseStatus,
        actor: &User,
    ) -> Result<Case, AppError> {
        let case = self.case_repo.find_by_id(id).await?.ok_or(AppError::CaseNotFound)?;

        let perms = case_rules::permissions_for(actor);
        let now = Utc::now();
        let effect = case_rules::apply_transition(&case, target, &perms, now)?;

        let mut tx = self.pool.begin().await?;

        let updated = self
            .case_repo
            .update_status(
                &mut *tx,
                id,
                target,
                effect.completed_date,
                effect.data_entrega,
            )
            .await?
            .ok_or(AppError::CaseNotFound)?;

        self.activity_repo
            .append(
                &mut *tx,
                &NewActivity {
                    user_id: Some(actor.id),
                    username: &actor.username,
                    action: ActivityAction::StatusChange,
                    resource_type: "case",
                    resource_id: Some(updated.id),
                    description: format!(
                        "Moveu o processo {} de '{}' para '{}'",
                        updated.process_number,
                        case.status.as_str(),
                        target.as_str()
                    ),
                },
            )
            .await?;

        tx.commit().await?;
        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid, actor: &User) -> Result<(), AppError> {
        // Busca antes de apagar para registrar o número do processo na trilha
        let case = self.case_repo.find_by_id(id).await?.ok_or(AppError::CaseNotFound)?;

        let mut tx = self.pool.begin().await?;

        self.case_repo.delete(&mut *tx, id).await?;

        self.activity_repo
            .append(
                &mut *tx,
                &NewActivity {
                    user_id: Some(actor.id),
                    username: &actor.username,
                    action: ActivityAction::Delete,
                    resource_type: "case",
                    resource_id: Some(id),
                    description: format!("Excluiu o processo {}", case.process_number),
                },
            )
            .await?;

        tx.commit().await?;
        Ok(())
    }
}

fn with_bucket(case: Case, today: chrono::NaiveDate) -> CaseWithBucket {
    let bucket = case_rules::bucket_for(case.status, case.due_date, today);
    CaseWithBucket { case, bucket }
}

// src/services/employee_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ActivityRepository, EmployeeRepository},
    models::{
        activity::{ActivityAction, NewActivity},
        employees::{
            CreateEmployeePayload, Employee, EmployeeListFilter, UpdateEmployeePayload,
        },
        users::User,
    },
};

#[derive(Clone)]
pub struct EmployeeService {
    employee_repo: EmployeeRepository,
    activity_repo: ActivityRepository,
    pool: PgPool,
}

impl EmployeeService {
    pub fn new(
        employee_repo: EmployeeRepository,
        activity_repo: ActivityRepository,
        pool: PgPool,
    ) -> Self {
        Self { employee_repo, activity_repo, pool }
    }

    pub async fn list(&self, filter: &EmployeeListFilter) -> Result<Vec<Employee>, AppError> {
        self.employee_repo.list(filter).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Employee, AppError> {
        self.employee_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::EmployeeNotFound)
    }

    pub async fn create(
        &self,
        payload: &CreateEmployeePayload,
        actor: &User,
    ) -> Result<Employee, AppError> {
        let mut tx = self.pool.begin().await?;

        let employee = self.employee_repo.create(&mut *tx, payload).await?;

        self.activity_repo
            .append(
                &mut *tx,
                &NewActivity {
                    user_id: Some(actor.id),
                    username: &actor.username,
                    action: ActivityAction::Create,
                    resource_type: "employee",
                    resource_id: Some(employee.id),
                    description: format!(
                        "Cadastrou o funcionário {} (matrícula {})",
                        employee.full_name, employee.matricula
                    ),
                },
            )
            .await?;

        tx.commit().await?;
        Ok(employee)
    }

    pub async fn update(
        &self,
        id: Uuid,
        payload: &UpdateEmployeePayload,
        actor: &User,
    ) -> Result<Employee, AppError> {
        let mut tx = self.pool.begin().await?;

        let employee = self
            .employee_repo
            .update(&mut *tx, id, payload)
            .await?
            .ok_or(AppError::EmployeeNotFound)?;

        self.activity_repo
            .append(
                &mut *tx,
                &NewActivity {
                    user_id: Some(actor.id),
                    username: &actor.username,
                    action: ActivityAction::Update,
                    resource_type: "employee",
                    resource_id: Some(employee.id),
                    description: format!(
                        "Atualizou o funcionário de matrícula {}",
                        employee.matricula
                    ),
                },
            )
            .await?;

        tx.commit().await?;
        Ok(employee)
    }

    // Exclusão lógica: o registro permanece para histórico e folha.
    pub async fn soft_delete(&self, id: Uuid, actor: &User) -> Result<(), AppError> {
        let employee = self
            .employee_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::EmployeeNotFound)?;

        let mut tx = self.pool.begin().await?;

        let deleted = self.employee_repo.soft_delete(&mut *tx, id).await?;
        if !deleted {
            // Já estava marcado como deletado
            return Err(AppError::EmployeeNotFound);
        }

        self.activity_repo
            .append(
                &mut *tx,
                &NewActivity {
                    user_id: Some(actor.id),
                    username: &actor.username,
                    action: ActivityAction::Delete,
                    resource_type: "employee",
                    resource_id: Some(id),
                    description: format!(
                        "Removeu o funcionário de matrícula {}",
                        employee.matricula
                    ),
                },
            )
            .await?;

        tx.commit().await?;
        Ok(())
    }
}

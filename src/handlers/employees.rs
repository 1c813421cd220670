// src/handlers/employees.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{PermEmployeesDelete, PermEmployeesWrite, RequirePermission},
    },
    models::employees::{
        CreateEmployeePayload, Employee, EmployeeListFilter, UpdateEmployeePayload,
    },
};

// GET /api/employees
#[utoipa::path(
    get,
    path = "/api/employees",
    tag = "Funcionários",
    params(EmployeeListFilter),
    responses(
        (status = 200, description = "Lista de funcionários", body = Vec<Employee>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_employees(
    State(app_state): State<AppState>,
    Query(filter): Query<EmployeeListFilter>,
) -> Result<impl IntoResponse, AppError> {
    let employees = app_state.employee_service.list(&filter).await?;
    Ok((StatusCode::OK, Json(employees)))
}

// GET /api/employees/{id}
#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    tag = "Funcionários",
    params(("id" = Uuid, Path, description = "ID do funcionário")),
    responses(
        (status = 200, description = "Funcionário encontrado", body = Employee),
        (status = 404, description = "Funcionário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_employee(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let employee = app_state.employee_service.get(id).await?;
    Ok((StatusCode::OK, Json(employee)))
}

// POST /api/employees
#[utoipa::path(
    post,
    path = "/api/employees",
    tag = "Funcionários",
    request_body = CreateEmployeePayload,
    responses(
        (status = 201, description = "Funcionário cadastrado", body = Employee),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "Matrícula já cadastrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_employee(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    _perm: RequirePermission<PermEmployeesWrite>,
    Json(payload): Json<CreateEmployeePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let employee = app_state.employee_service.create(&payload, &user).await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

// PATCH /api/employees/{id}
#[utoipa::path(
    patch,
    path = "/api/employees/{id}",
    tag = "Funcionários",
    params(("id" = Uuid, Path, description = "ID do funcionário")),
    request_body = UpdateEmployeePayload,
    responses(
        (status = 200, description = "Funcionário atualizado", body = Employee),
        (status = 404, description = "Funcionário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_employee(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    _perm: RequirePermission<PermEmployeesWrite>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateEmployeePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let employee = app_state.employee_service.update(id, &payload, &user).await?;
    Ok((StatusCode::OK, Json(employee)))
}

// DELETE /api/employees/{id} (exclusão lógica)
#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    tag = "Funcionários",
    params(("id" = Uuid, Path, description = "ID do funcionário")),
    responses(
        (status = 204, description = "Funcionário marcado como deletado"),
        (status = 404, description = "Funcionário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_employee(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    _perm: RequirePermission<PermEmployeesDelete>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.employee_service.soft_delete(id, &user).await?;
    Ok(StatusCode::NO_CONTENT)
}

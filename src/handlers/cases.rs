// src/handlers/cases.rs

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
        rbac::{PermCasesDelete, PermCasesWrite, RequirePermission},
    },
    models::cases::{
        CaseListFilter, CaseWithBucket, CreateCasePayload, UpdateCasePayload,
        UpdateCaseStatusPayload,
    },
};

// GET /api/cases
#[utoipa::path(
    get,
    path = "/api/cases",
    tag = "Processos",
    params(CaseListFilter),
    responses(
        (status = 200, description = "Lista de processos com bucket de urgência", body = Vec<CaseWithBucket>),
        (status = 401, description = "Não autenticado")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_cases(
    State(app_state): State<AppState>,
    Query(filter): Query<CaseListFilter>,
) -> Result<impl IntoResponse, AppError> {
    let cases = app_state.case_service.list(&filter).await?;
    Ok((StatusCode::OK, Json(cases)))
}

// GET /api/cases/{id}
#[utoipa::path(
    get,
    path = "/api/cases/{id}",
    tag = "Processos",
    params(("id" = Uuid, Path, description = "ID do processo")),
    responses(
        (status = 200, description = "Processo encontrado", body = CaseWithBucket),
        (status = 404, description = "Processo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_case(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let case = app_state.case_service.get(id).await?;
    Ok((StatusCode::OK, Json(case)))
}

// POST /api/cases
#[utoipa::path(
    post,
    path = "/api/cases",
    tag = "Processos",
    request_body = CreateCasePayload,
    responses(
        (status = 201, description = "Processo cadastrado"),
        (status = 400, description = "Dados inválidos"),
        (status = 403, description = "Permissão insuficiente"),
        (status = 409, description = "Número de processo já cadastrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_case(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    _perm: RequirePermission<PermCasesWrite>,
    Json(payload): Json<CreateCasePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let case = app_state.case_service.create(&payload, &user).await?;
    Ok((StatusCode::CREATED, Json(case)))
}

// PATCH /api/cases/{id}
#[utoipa::path(
    patch,
    path = "/api/cases/{id}",
    tag = "Processos",
    params(("id" = Uuid, Path, description = "ID do processo")),
    request_body = UpdateCasePayload,
    responses(
        (status = 200, description = "Processo atualizado"),
        (status = 403, description = "Permissão insuficiente ou campo vetado para o perfil (code: field_not_editable)"),
        (status = 404, description = "Processo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_case(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    _perm: RequirePermission<PermCasesWrite>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCasePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let case = app_state.case_service.update(id, &payload, &user).await?;
    Ok((StatusCode::OK, Json(case)))
}

// PATCH /api/cases/{id}/status
//
// A autorização aqui é a regra de transição (papel + overrides do usuário),
// não o guard de escrita: um viewer pode concluir um processo.
#[utoipa::path(
    patch,
    path = "/api/cases/{id}/status",
    tag = "Processos",
    params(("id" = Uuid, Path, description = "ID do processo")),
    request_body = UpdateCaseStatusPayload,
    responses(
        (status = 200, description = "Status alterado"),
        (status = 403, description = "Transição não permitida para o perfil (code: transition_not_allowed)"),
        (status = 404, description = "Processo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_case_status(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCaseStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let case = app_state
        .case_service
        .change_status(id, payload.status, &user)
        .await?;
    Ok((StatusCode::OK, Json(case)))
}

// DELETE /api/cases/{id}
#[utoipa::path(
    delete,
    path = "/api/cases/{id}",
    tag = "Processos",
    params(("id" = Uuid, Path, description = "ID do processo")),
    responses(
        (status = 204, description = "Processo excluído"),
        (status = 403, description = "Permissão insuficiente"),
        (status = 404, description = "Processo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_case(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    _perm: RequirePermission<PermCasesDelete>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.case_service.delete(id, &user).await?;
    Ok(StatusCode::NO_CONTENT)
}

// src/handlers/activity.rs

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    common::error::AppError,
    config::AppState,
    models::activity::{ActivityListFilter, ActivityLog},
};

// GET /api/activity-logs
#[utoipa::path(
    get,
    path = "/api/activity-logs",
    tag = "Auditoria",
    params(ActivityListFilter),
    responses(
        (status = 200, description = "Entradas mais recentes primeiro", body = Vec<ActivityLog>),
        (status = 401, description = "Não autenticado")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_activity_logs(
    State(app_state): State<AppState>,
    Query(filter): Query<ActivityListFilter>,
) -> Result<impl IntoResponse, AppError> {
    let logs = app_state.activity_service.list(&filter).await?;
    Ok((StatusCode::OK, Json(logs)))
}

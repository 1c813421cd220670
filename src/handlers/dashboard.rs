// src/handlers/dashboard.rs

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    common::error::AppError,
    config::AppState,
    models::dashboard::{CasesByStatusEntry, DashboardSummary, DeadlineEntry, DeadlineQuery},
};

// GET /api/dashboard/summary
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Cards do painel", body = DashboardSummary)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let summary = app_state.dashboard_service.get_summary().await?;
    Ok((StatusCode::OK, Json(summary)))
}

// GET /api/dashboard/cases-by-status
#[utoipa::path(
    get,
    path = "/api/dashboard/cases-by-status",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Contagem por status para o gráfico", body = Vec<CasesByStatusEntry>)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_cases_by_status(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let entries = app_state.dashboard_service.cases_by_status().await?;
    Ok((StatusCode::OK, Json(entries)))
}

// GET /api/dashboard/deadlines
#[utoipa::path(
    get,
    path = "/api/dashboard/deadlines",
    tag = "Dashboard",
    params(DeadlineQuery),
    responses(
        (status = 200, description = "Processos abertos vencendo na janela", body = Vec<DeadlineEntry>)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_deadlines(
    State(app_state): State<AppState>,
    Query(query): Query<DeadlineQuery>,
) -> Result<impl IntoResponse, AppError> {
    let days = query.days.unwrap_or(7).clamp(1, 90);
    let entries = app_state.dashboard_service.upcoming_deadlines(days).await?;
    Ok((StatusCode::OK, Json(entries)))
}

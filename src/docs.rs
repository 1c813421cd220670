// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Processos ---
        handlers::cases::list_cases,
        handlers::cases::get_case,
        handlers::cases::create_case,
        handlers::cases::update_case,
        handlers::cases::update_case_status,
        handlers::cases::delete_case,

        // --- Funcionários ---
        handlers::employees::list_employees,
        handlers::employees::get_employee,
        handlers::employees::create_employee,
        handlers::employees::update_employee,
        handlers::employees::delete_employee,

        // --- Usuários ---
        handlers::users::list_users,
        handlers::users::get_user,
        handlers::users::create_user,
        handlers::users::update_user,
        handlers::users::delete_user,

        // --- Auditoria ---
        handlers::activity::list_activity_logs,

        // --- Dashboard ---
        handlers::dashboard::get_summary,
        handlers::dashboard::get_cases_by_status,
        handlers::dashboard::get_deadlines,
    ),
    components(
        schemas(
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,
            models::users::User,
            models::users::Role,
            models::users::UserPermissions,
            models::users::TransitionOverrides,
            models::users::CaseFieldOverrides,
            models::users::CreateUserPayload,
            models::users::UpdateUserPayload,
            models::cases::Case,
            models::cases::CaseStatus,
            models::cases::Bucket,
            models::cases::CaseWithBucket,
            models::cases::CreateCasePayload,
            models::cases::UpdateCasePayload,
            models::cases::UpdateCaseStatusPayload,
            models::employees::Employee,
            models::employees::EmployeeStatus,
            models::employees::CreateEmployeePayload,
            models::employees::UpdateEmployeePayload,
            models::activity::ActivityLog,
            models::activity::ActivityAction,
            models::dashboard::DashboardSummary,
            models::dashboard::CasesByStatusEntry,
            models::dashboard::DeadlineEntry,
        )
    ),
    tags(
        (name = "Auth", description = "Registro e autenticação"),
        (name = "Processos", description = "Gestão de processos jurídicos"),
        (name = "Funcionários", description = "Registros de RH com exclusão lógica"),
        (name = "Usuários", description = "Contas e permissões (somente admin)"),
        (name = "Auditoria", description = "Trilha de auditoria append-only"),
        (name = "Dashboard", description = "Agregações para o painel"),
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    pub fn with_security() -> utoipa::openapi::OpenApi {
        let mut doc = <Self as OpenApi>::openapi();
        if let Some(components) = doc.components.as_mut() {
            components.add_security_scheme(
                "api_jwt",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
        doc
    }
}

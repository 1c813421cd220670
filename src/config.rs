// src/config.rs

use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{env, time::Duration};

use crate::{
    db::{
        ActivityRepository, CaseRepository, DashboardRepository, EmployeeRepository,
        UserRepository,
    },
    services::{
        activity_service::ActivityService, auth::AuthService, case_service::CaseService,
        dashboard_service::DashboardService, employee_service::EmployeeService,
        user_service::UserService,
    },
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub case_service: CaseService,
    pub employee_service: EmployeeService,
    pub user_service: UserService,
    pub activity_service: ActivityService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let case_repo = CaseRepository::new(db_pool.clone());
        let employee_repo = EmployeeRepository::new(db_pool.clone());
        let activity_repo = ActivityRepository::new(db_pool.clone());
        let dashboard_repo = DashboardRepository::new(db_pool.clone());

        let auth_service = AuthService::new(
            user_repo.clone(),
            activity_repo.clone(),
            jwt_secret,
            db_pool.clone(),
        );
        let case_service =
            CaseService::new(case_repo.clone(), activity_repo.clone(), db_pool.clone());
        let employee_service =
            EmployeeService::new(employee_repo, activity_repo.clone(), db_pool.clone());
        let user_service = UserService::new(user_repo, activity_repo.clone(), db_pool.clone());
        let activity_service = ActivityService::new(activity_repo);
        let dashboard_service = DashboardService::new(dashboard_repo, case_repo);

        Ok(Self {
            db_pool,
            auth_service,
            case_service,
            employee_service,
            user_service,
            activity_service,
            dashboard_service,
        })
    }
}

// src/services/dashboard_service.rs

use chrono::Utc;

use crate::{
    common::error::AppError,
    db::{CaseRepository, DashboardRepository},
    models::dashboard::{CasesByStatusEntry, DashboardSummary, DeadlineEntry},
    services::case_rules,
};

#[derive(Clone)]
pub struct DashboardService {
    repo: DashboardRepository,
    case_repo: CaseRepository,
}

impl DashboardService {
    pub fn new(repo: DashboardRepository, case_repo: CaseRepository) -> Self {
        Self { repo, case_repo }
    }

    pub async fn get_summary(&self) -> Result<DashboardSummary, AppError> {
        let today = Utc::now().date_naive();
        self.repo.get_summary(today).await
    }

    pub async fn cases_by_status(&self) -> Result<Vec<CasesByStatusEntry>, AppError> {
        self.repo.cases_by_status().await
    }

    // Processos abertos vencendo na janela, cada um com o bucket do momento
    pub async fn upcoming_deadlines(&self, days: i64) -> Result<Vec<DeadlineEntry>, AppError> {
        let today = Utc::now().date_naive();
        let cases = self.case_repo.upcoming_deadlines(today, days).await?;

        let entries = cases
            .into_iter()
            .filter_map(|c| {
                let due_date = c.due_date?;
                Some(DeadlineEntry {
                    bucket: case_rules::bucket_for(c.status, Some(due_date), today),
                    id: c.id,
                    client_name: c.client_name,
                    process_number: c.process_number,
                    status: c.status,
                    due_date,
                })
            })
            .collect();

        Ok(entries)
    }
}

// src/services/activity_service.rs

use crate::{
    common::error::AppError,
    db::ActivityRepository,
    models::activity::{ActivityListFilter, ActivityLog},
};

#[derive(Clone)]
pub struct ActivityService {
    repo: ActivityRepository,
}

impl ActivityService {
    pub fn new(repo: ActivityRepository) -> Self {
        Self { repo }
    }

    pub async fn list(&self, filter: &ActivityListFilter) -> Result<Vec<ActivityLog>, AppError> {
        self.repo.list(filter).await
    }
}

use anyhow::Result;
use chrono::{Local, NaiveDate};
use shared::{OverviewResponse, TaskAssignment};
use tracing::info;

use super::assignment_service::AssignmentService;
use super::bucketizer::split_pending_assignments;
use super::error::ValidationError;
use crate::storage::Storage;

/// The minion's home screen: catch up on missed days, then show what is due
#[derive(Clone)]
pub struct OverviewService {
    storage: Storage,
    assignment_service: AssignmentService,
}

impl OverviewService {
    pub fn new(storage: Storage, assignment_service: AssignmentService) -> Self {
        Self {
            storage,
            assignment_service,
        }
    }

    pub async fn overview(&self, minion_id: i64) -> Result<OverviewResponse> {
        self.overview_as_of(minion_id, Local::now().date_naive()).await
    }

    pub async fn overview_as_of(&self, minion_id: i64, today: NaiveDate) -> Result<OverviewResponse> {
        let minion = self
            .storage
            .minions
            .get_minion(minion_id)
            .await?
            .ok_or(ValidationError::MinionNotFound(minion_id))?;

        self.assignment_service.update_as_of(&minion, today).await?;

        let pending: Vec<TaskAssignment> = self
            .storage
            .assignments
            .assignments_for_minion(minion_id, false)
            .await?
            .into_iter()
            .map(|a| a.with_age_as_of(today))
            .collect();
        let split = split_pending_assignments(&pending, today);
        let domains = self.storage.domains.domains_for_minion(minion_id).await?;

        info!(
            "Overview for minion {}: {} today, {} this week, {} overdue",
            minion_id,
            split.today.len(),
            split.this_week.len(),
            split.overdue.len()
        );

        Ok(OverviewResponse {
            minion,
            domains,
            today: split.today,
            this_week: split.this_week,
            overdue: split.overdue,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::SchedulerError;
    use crate::domain::shuffle::InOrder;
    use crate::storage::{DbConnection, DomainStorage, MinionStorage, TaskStorage};
    use chrono::Duration;
    use shared::Task;
    use std::sync::Arc;

    async fn setup_test() -> (OverviewService, Storage, i64) {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let storage = Storage::sqlite(db);
        let minion = storage.minions.find_or_create_minion("m@example.com", "M").await.unwrap();
        let service = AssignmentService::new(storage.clone(), Arc::new(InOrder));
        (OverviewService::new(storage.clone(), service), storage, minion.id)
    }

    async fn add_task(storage: &Storage, domain_id: i64, name: &str, weekly: bool, count: u32) {
        storage
            .tasks
            .create_task(&Task {
                id: 0,
                domain_id,
                name: name.to_string(),
                weekly,
                count,
                description: None,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_overview_of_new_minion_is_empty() {
        let (service, _, minion) = setup_test().await;

        let overview = service.overview(minion).await.unwrap();

        assert!(overview.domains.is_empty());
        assert!(overview.today.is_empty() && overview.this_week.is_empty() && overview.overdue.is_empty());
    }

    #[tokio::test]
    async fn test_overview_splits_catch_up_assignments() {
        let (service, storage, minion) = setup_test().await;
        // a Monday
        let start = NaiveDate::from_ymd_opt(2019, 1, 28).unwrap();
        let domain = storage.domains.create_domain(minion, "House", start).await.unwrap();
        add_task(&storage, domain.id, "Dishes", false, 5).await;
        add_task(&storage, domain.id, "Sweep", false, 5).await;

        let first = service.overview_as_of(minion, start).await.unwrap();
        assert_eq!(first.today.len(), 1);
        assert_eq!(first.domains.len(), 1);

        let later = service.overview_as_of(minion, start + Duration::days(2)).await.unwrap();
        // Monday's and Tuesday's daily chores are overdue by Wednesday
        assert_eq!(later.today.len(), 1);
        assert_eq!(later.overdue.len(), 2);
        assert!(later.overdue.iter().all(|a| a.age_in_days > 0));
    }

    #[tokio::test]
    async fn test_overview_weekly_stays_this_week() {
        let (service, storage, minion) = setup_test().await;
        let monday = NaiveDate::from_ymd_opt(2019, 1, 28).unwrap();
        let domain = storage.domains.create_domain(minion, "Garden", monday).await.unwrap();
        add_task(&storage, domain.id, "Mow", true, 1).await;

        service.overview_as_of(minion, monday).await.unwrap();
        let wednesday = service.overview_as_of(minion, monday + Duration::days(2)).await.unwrap();

        assert_eq!(wednesday.this_week.len(), 1);
        assert_eq!(wednesday.this_week[0].task.name, "Mow");
        assert!(wednesday.today.is_empty());
    }

    #[tokio::test]
    async fn test_overview_unknown_minion() {
        let (service, _, _) = setup_test().await;

        let err = service.overview(404).await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ValidationError>(),
            Some(ValidationError::MinionNotFound(404))
        ));
        assert!(err.downcast_ref::<SchedulerError>().is_none());
    }
}

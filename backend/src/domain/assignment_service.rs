//! Daily assignment of chores.
//!
//! Every domain hands each of its members one chore per day:
//! - On the 1st of the month all completed chores of a domain are shuffled
//!   back into its deck (at most once per month).
//! - A minion who missed days gets the chores of those days retroactively.
//! - A chore can only be handed out while the deck still has cards of it.
//! - When the deck is empty the day is simply free.
//!
//! Callers must not run [`AssignmentService::update`] concurrently for the
//! same minion; the read-then-insert sequence is not atomic.

use chrono::{Datelike, Local, NaiveDate};
use shared::{Domain, Minion, Task, TaskAssignment};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

use super::availability::filter_available;
use super::dates::same_month;
use super::error::SchedulerError;
use super::gap_filler::assign_tasks_for_domain;
use super::shuffle::Shuffler;
use crate::storage::Storage;

/// Service that keeps every minion supplied with one chore per domain per day
#[derive(Clone)]
pub struct AssignmentService {
    storage: Storage,
    shuffler: Arc<dyn Shuffler>,
}

impl AssignmentService {
    pub fn new(storage: Storage, shuffler: Arc<dyn Shuffler>) -> Self {
        Self { storage, shuffler }
    }

    /// Bring the minion's assignments up to date as of today
    pub async fn update(&self, minion: &Minion) -> Result<Vec<TaskAssignment>, SchedulerError> {
        self.update_as_of(minion, Local::now().date_naive()).await
    }

    /// Bring the minion's assignments up to date as of `today`.
    ///
    /// Returns everything that was planned, including `NoTask` placeholders;
    /// only real assignments are stored. A storage failure stops the run,
    /// assignments stored before the failure stay stored.
    pub async fn update_as_of(&self, minion: &Minion, today: NaiveDate) -> Result<Vec<TaskAssignment>, SchedulerError> {
        info!("Updating assignments for minion {} as of {}", minion.id, today);

        let mut domains = self.storage.domains.domains_for_minion(minion.id).await?;
        let mut available_for_domain: HashMap<i64, Vec<Task>> = HashMap::new();

        for domain in domains.iter_mut() {
            if needs_reset(domain, today) {
                info!("Monthly reset of domain {} ({})", domain.id, domain.name);
                self.storage.domains.reset_completed_tasks(domain.id, today).await?;
                domain.last_reset_date = today;
            }

            let available = self.storage.tasks.available_tasks_for_domain(domain.id, minion.id).await?;
            available_for_domain.insert(domain.id, available);
        }

        // completed assignments still occupy their day
        let assignments = self.storage.assignments.assignments_for_minion(minion.id, true).await?;

        let planned = assign_tasks(
            minion.id,
            &domains,
            &available_for_domain,
            &assignments,
            today,
            self.shuffler.as_ref(),
        )?;

        let mut stored = 0;
        for assignment in planned.iter().filter(|a| !a.is_no_task()) {
            self.storage.assignments.insert_assignment(assignment).await?;
            stored += 1;
        }

        info!(
            "Stored {} new assignments for minion {} ({} days without a chore)",
            stored,
            minion.id,
            planned.len() - stored
        );

        Ok(planned)
    }
}

/// Whether the domain is due for its monthly reset on `today`
pub fn needs_reset(domain: &Domain, today: NaiveDate) -> bool {
    today.day() == 1 && !same_month(&domain.last_reset_date, &today)
}

/// Plan new assignments for every domain without touching storage.
///
/// `assignments` may span all of the minion's domains and may include
/// completed assignments: all of them occupy their day, but only pending ones
/// hold a card of the deck. Days before a domain's last reset are not
/// revisited.
pub fn assign_tasks(
    minion_id: i64,
    domains: &[Domain],
    available_for_domain: &HashMap<i64, Vec<Task>>,
    assignments: &[TaskAssignment],
    up_to_including: NaiveDate,
    shuffler: &dyn Shuffler,
) -> Result<Vec<TaskAssignment>, SchedulerError> {
    let mut result = Vec::new();

    for domain in domains {
        let in_domain: Vec<TaskAssignment> = assignments
            .iter()
            .filter(|a| a.task.domain_id == domain.id)
            .cloned()
            .collect();

        let pending: Vec<TaskAssignment> = in_domain.iter().filter(|a| a.is_pending()).cloned().collect();
        let available = available_for_domain.get(&domain.id).cloned().unwrap_or_default();
        let available = filter_available(available, &pending);

        let this_period: Vec<TaskAssignment> = in_domain
            .into_iter()
            .filter(|a| a.assigned_on >= domain.last_reset_date)
            .collect();

        let additional = assign_tasks_for_domain(minion_id, available, &this_period, up_to_including, shuffler)?;
        debug!("Domain {} needs {} new assignments", domain.id, additional.len());
        result.extend(additional);
    }

    Ok(result)
}

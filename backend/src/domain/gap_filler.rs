//! Retroactive assignment of missed days.
//!
//! A minion who did not open the app for a few days still owes one chore per
//! domain for each of those days. Starting from the oldest assignment the
//! minion still has on record, every day up to and including today that has
//! no assignment gets a new one. When the deck runs out the day gets the
//! `NoTask` placeholder instead, which is never stored.

use chrono::NaiveDate;
use shared::{Task, TaskAssignment};
use std::collections::HashSet;

use super::dates::{canonical_date_string, contiguous_dates};
use super::error::SchedulerError;
use super::shuffle::Shuffler;

/// New assignments for one domain.
///
/// With nothing assigned yet (new domain, new member, or just after a reset)
/// a single assignment dated `up_to_including` is created. Otherwise every gap
/// between the oldest assignment and `up_to_including` is filled.
pub fn assign_tasks_for_domain(
    minion_id: i64,
    mut available: Vec<Task>,
    assignments: &[TaskAssignment],
    up_to_including: NaiveDate,
    shuffler: &dyn Shuffler,
) -> Result<Vec<TaskAssignment>, SchedulerError> {
    shuffler.shuffle(&mut available);

    if assignments.is_empty() {
        let first = available
            .into_iter()
            .next()
            .map(|task| TaskAssignment::new(task, minion_id, up_to_including))
            .unwrap_or_else(|| TaskAssignment::no_task(minion_id, up_to_including));
        return Ok(vec![first]);
    }

    fill_gaps_with_tasks(minion_id, assignments, available, up_to_including)
}

/// For every day without an assignment, take the next template from `available`.
///
/// `available` is consumed front to back, one template per missing day.
pub fn fill_gaps_with_tasks(
    minion_id: i64,
    assigned: &[TaskAssignment],
    available: Vec<Task>,
    up_to_including: NaiveDate,
) -> Result<Vec<TaskAssignment>, SchedulerError> {
    let oldest = find_oldest_assignment_date(assigned)?;
    let dates = contiguous_dates(&oldest, &up_to_including);

    if assigned.len() > dates.len() {
        return Err(SchedulerError::Consistency {
            assigned: assigned.len(),
            days: dates.len(),
        });
    }

    if assigned.len() == dates.len() {
        return Ok(Vec::new());
    }

    let taken: HashSet<String> = assigned
        .iter()
        .map(|a| canonical_date_string(&a.assigned_on))
        .collect();

    let mut deck = available.into_iter();
    let result = dates
        .into_iter()
        .filter(|date| !taken.contains(&canonical_date_string(date)))
        .map(|date| match deck.next() {
            Some(task) => TaskAssignment::new(task, minion_id, date),
            None => TaskAssignment::no_task(minion_id, date),
        })
        .collect();

    Ok(result)
}

/// Earliest `assigned_on` of the given assignments
pub fn find_oldest_assignment_date(assignments: &[TaskAssignment]) -> Result<NaiveDate, SchedulerError> {
    assignments
        .iter()
        .map(|a| a.assigned_on)
        .min()
        .ok_or(SchedulerError::NoAssignments)
}

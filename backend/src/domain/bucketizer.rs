//! Display split of a minion's pending assignments.
//!
//! Daily chores are due on the day they were assigned; anything older is
//! overdue. Weekly chores stay current until the week they were assigned in
//! is over. Weeks start on Sunday.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use shared::TaskAssignment;

use super::dates::{calendar_day, is_weekend_day};

/// Longest age at which a weekly assignment can still be in the current week
const MAX_WEEKLY_AGE: i64 = 6;

/// Pending assignments grouped for display
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PendingSplit {
    pub today: Vec<TaskAssignment>,
    pub this_week: Vec<TaskAssignment>,
    pub overdue: Vec<TaskAssignment>,
}

impl PendingSplit {
    pub fn len(&self) -> usize {
        self.today.len() + self.this_week.len() + self.overdue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Split `pending` into today, this week and overdue relative to `now`.
///
/// Relies on `age_in_days` having been computed against the same day as `now`.
pub fn split_pending_assignments(pending: &[TaskAssignment], now: NaiveDate) -> PendingSplit {
    let mut split = PendingSplit::default();
    let now_day = now.weekday().num_days_from_sunday();

    for assignment in pending {
        if assignment.age_in_days == 0 {
            split.today.push(assignment.clone());
            continue;
        }
        if !assignment.task.weekly || assignment.age_in_days > MAX_WEEKLY_AGE {
            split.overdue.push(assignment.clone());
            continue;
        }

        // a previous weekend or any weekday later than today belongs to last week
        // TODO: weeks starting on Monday would need a configurable first day here
        let day = assignment.assigned_on.weekday();
        if day.num_days_from_sunday() > now_day || is_weekend_day(day) {
            split.overdue.push(assignment.clone());
        } else {
            split.this_week.push(assignment.clone());
        }
    }

    split
}

/// [`split_pending_assignments`] for any timestamp, using its calendar day.
///
/// `None` when `now` has no calendar day.
pub fn split_pending_assignments_at<D: Datelike>(pending: &[TaskAssignment], now: &D) -> Option<PendingSplit> {
    calendar_day(now).map(|day| split_pending_assignments(pending, day))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use shared::Task;

    // a Tuesday
    fn now() -> NaiveDate {
        NaiveDate::from_ymd_opt(2019, 1, 29).unwrap()
    }

    fn pending(age: i64, weekly: bool) -> TaskAssignment {
        let task = Task {
            id: 1,
            domain_id: 1,
            name: "chore".to_string(),
            weekly,
            count: 1,
            description: None,
        };
        TaskAssignment::new(task, 1, now() - Duration::days(age)).with_age_as_of(now())
    }

    #[test]
    fn test_split_task_assignments() {
        let mut all = vec![pending(0, false), pending(0, false)];
        // one weekly for every day from today back to last Tuesday
        all.extend((0..=7).map(|age| pending(age, true)));
        all.extend([18, 21, 300].iter().map(|age| pending(*age, false)));

        let split = split_pending_assignments(&all, now());

        // 2 daily + 1 weekly for today
        assert_eq!(split.today.len(), 3);
        // only Monday's weekly is from this week and not today
        assert_eq!(split.this_week.len(), 1);
        assert_eq!(split.this_week[0].assigned_on.weekday(), chrono::Weekday::Mon);
        assert_eq!(split.overdue.len(), 9);
        assert_eq!(split.len(), all.len());
    }

    #[test]
    fn test_daily_today() {
        let split = split_pending_assignments(&[pending(0, false)], now());
        assert_eq!(split.today.len(), 1);
        assert!(split.this_week.is_empty() && split.overdue.is_empty());
    }

    #[test]
    fn test_old_daily_is_overdue() {
        let split = split_pending_assignments(&[pending(300, false), pending(1, false)], now());
        assert_eq!(split.overdue.len(), 2);
    }

    #[test]
    fn test_weekly_yesterday_on_weekday_is_this_week() {
        let split = split_pending_assignments(&[pending(1, true)], now());
        assert_eq!(split.this_week.len(), 1);
    }

    #[test]
    fn test_weekly_seven_days_old_is_overdue() {
        // last Tuesday: same weekday as now, but a week old
        let split = split_pending_assignments(&[pending(7, true)], now());
        assert_eq!(split.overdue.len(), 1);
    }

    #[test]
    fn test_weekly_from_weekend_is_overdue() {
        let saturday = NaiveDate::from_ymd_opt(2019, 2, 2).unwrap();
        let from_friday = TaskAssignment {
            assigned_on: saturday - Duration::days(1),
            age_in_days: 1,
            ..pending(0, true)
        };
        let split = split_pending_assignments(&[from_friday], saturday);
        assert_eq!(split.this_week.len(), 1);

        let sunday = NaiveDate::from_ymd_opt(2019, 2, 3).unwrap();
        let from_saturday = TaskAssignment {
            assigned_on: saturday,
            age_in_days: 1,
            ..pending(0, true)
        };
        let split = split_pending_assignments(&[from_saturday], sunday);
        assert_eq!(split.overdue.len(), 1);
    }

    #[test]
    fn test_split_at_timestamp() {
        let evening = now().and_hms_opt(22, 30, 0).unwrap();
        let split = split_pending_assignments_at(&[pending(0, false), pending(1, true)], &evening).unwrap();
        assert_eq!(split.today.len(), 1);
        assert_eq!(split.this_week.len(), 1);
    }

    #[test]
    fn test_empty() {
        let split = split_pending_assignments(&[], now());
        assert!(split.is_empty());
    }
}

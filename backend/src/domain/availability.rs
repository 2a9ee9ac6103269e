//! Remaining supply of task templates.
//!
//! A template's `count` is the number of cards of that chore in the domain's
//! deck. Every pending assignment holds one card, so what can still be handed
//! out is the count minus the pending assignments of that template.

use shared::{Task, TaskAssignment};
use std::collections::HashMap;

/// Templates that still have cards left after accounting for `pending`,
/// with `count` set to the number of cards left.
///
/// Pending assignments of templates not in `available` are ignored, and a
/// template never goes below zero no matter how many assignments reference it.
pub fn filter_available(available: Vec<Task>, pending: &[TaskAssignment]) -> Vec<Task> {
    if pending.is_empty() {
        return available;
    }

    let mut remaining: HashMap<i64, u32> = available.iter().map(|t| (t.id, t.count)).collect();

    for assignment in pending {
        if let Some(count) = remaining.get_mut(&assignment.task.id) {
            *count = count.saturating_sub(1);
        }
    }

    available
        .into_iter()
        .filter_map(|mut task| {
            let count = remaining.get(&task.id).copied().unwrap_or(0);
            if count == 0 {
                return None;
            }
            task.count = count;
            Some(task)
        })
        .collect()
}

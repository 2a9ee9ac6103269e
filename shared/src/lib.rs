use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identity of the `NoTask` sentinel. Real templates always have a positive id.
pub const NO_TASK_ID: i64 = 0;

/// A person who performs tasks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Minion {
    pub id: i64,
    /// Display name, the only field that may change after creation
    pub name: String,
    /// Unique external identity
    pub email: String,
}

/// A named collection of task templates owned by one minion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub id: i64,
    /// Minion id of the owner
    pub owner: i64,
    pub name: String,
    /// Day the completed assignments of this domain were last cleared
    pub last_reset_date: NaiveDate,
    /// Number of templates in the domain
    pub task_count: i64,
}

/// A recurring chore definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub domain_id: i64,
    pub name: String,
    /// Weekly cadence instead of daily
    pub weekly: bool,
    /// Number of simultaneous outstanding instances allowed pool-wide
    pub count: u32,
    pub description: Option<String>,
}

impl Task {
    /// The "nothing to do" placeholder used when a domain's pool ran dry.
    /// Never persisted.
    pub fn no_task() -> Self {
        Self {
            id: NO_TASK_ID,
            domain_id: 0,
            name: "Nothing to do".to_string(),
            weekly: false,
            count: 0,
            description: None,
        }
    }

    pub fn is_no_task(&self) -> bool {
        self.id == NO_TASK_ID
    }
}

/// Lifecycle of an assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    Pending,
    /// Completed, card shuffled back into the pool
    DoneAndAvailable,
    /// Completed, card retired until the next monthly reset
    DoneAndStashed,
}

impl AssignmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentStatus::Pending => "pending",
            AssignmentStatus::DoneAndAvailable => "done_and_available",
            AssignmentStatus::DoneAndStashed => "done_and_stashed",
        }
    }

    pub fn is_completed(&self) -> bool {
        !matches!(self, AssignmentStatus::Pending)
    }
}

impl fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown assignment status: {}", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for AssignmentStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(AssignmentStatus::Pending),
            "done_and_available" => Ok(AssignmentStatus::DoneAndAvailable),
            "done_and_stashed" => Ok(AssignmentStatus::DoneAndStashed),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// One dated instance of a task template assigned to a minion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskAssignment {
    /// 0 until persisted
    pub id: i64,
    pub task: Task,
    pub minion_id: i64,
    pub assigned_on: NaiveDate,
    pub status: AssignmentStatus,
    /// Days between `assigned_on` and the day the assignment was loaded
    pub age_in_days: i64,
}

impl TaskAssignment {
    /// Build a new, not yet persisted, pending assignment
    pub fn new(task: Task, minion_id: i64, assigned_on: NaiveDate) -> Self {
        Self {
            id: 0,
            task,
            minion_id,
            assigned_on,
            status: AssignmentStatus::Pending,
            age_in_days: 0,
        }
    }

    /// Placeholder for a day on which no template was left in the pool
    pub fn no_task(minion_id: i64, assigned_on: NaiveDate) -> Self {
        Self::new(Task::no_task(), minion_id, assigned_on)
    }

    pub fn is_no_task(&self) -> bool {
        self.task.is_no_task()
    }

    pub fn is_pending(&self) -> bool {
        self.status == AssignmentStatus::Pending
    }

    /// Recompute `age_in_days` relative to `today`
    pub fn with_age_as_of(mut self, today: NaiveDate) -> Self {
        self.age_in_days = (today - self.assigned_on).num_days();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateMinionRequest {
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateDomainRequest {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    pub name: String,
    #[serde(default)]
    pub weekly: bool,
    pub count: u32,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompleteAssignmentRequest {
    /// true shuffles the card back into the pool, false stashes it
    pub return_task: bool,
}

/// Pending work split for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewResponse {
    pub minion: Minion,
    pub domains: Vec<Domain>,
    pub today: Vec<TaskAssignment>,
    pub this_week: Vec<TaskAssignment>,
    pub overdue: Vec<TaskAssignment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainTasksResponse {
    pub domain: Domain,
    pub daily: Vec<Task>,
    pub weekly: Vec<Task>,
}

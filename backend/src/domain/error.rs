//! Error types for the domain layer.

/// Failures of the scheduling engine
#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    /// The storage collaborator failed; passed through unchanged
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
    /// More assignments are recorded than there are days in the span they cover
    #[error("{assigned} assignments recorded across only {days} days")]
    Consistency { assigned: usize, days: usize },
    #[error("no assignments to find the oldest date from")]
    NoAssignments,
}

/// Rejected user input for the management services
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Name cannot be empty")]
    EmptyName,
    #[error("Name is too long")]
    NameTooLong,
    #[error("Email cannot be empty")]
    EmptyEmail,
    #[error("Count must be at least 1")]
    ZeroCount,
    #[error("Domain not found: {0}")]
    DomainNotFound(i64),
    #[error("Minion not found: {0}")]
    MinionNotFound(i64),
    #[error("Assignment not found: {0}")]
    AssignmentNotFound(i64),
    #[error("Minion {minion_id} does not own domain {domain_id}")]
    NotDomainOwner { minion_id: i64, domain_id: i64 },
    #[error("Assignment {0} belongs to another minion")]
    NotAssignee(i64),
    #[error("Assignment {0} is no longer pending")]
    NotPending(i64),
}

/// Longest accepted name for domains, tasks and minions
pub const MAX_NAME_LENGTH: usize = 128;

/// Trimmed, length-checked name
pub fn validate_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::NameTooLong);
    }
    Ok(trimmed.to_string())
}

//! Goal tracking error types.

use crate::errors::ErrorKind;
use thiserror::Error;

/// Goal tracking errors
#[derive(Debug, Error)]
pub enum GoalError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Owning user does not exist
    #[error("User {0} not found")]
    UserNotFound(i64),

    /// Goal does not exist
    #[error("Goal {0} not found")]
    GoalNotFound(i64),

    /// Goal name missing or blank
    #[error("Goal name is required")]
    MissingName,

    /// Goal name holds a NUL character
    #[error("Goal name must not contain NUL characters")]
    NulInName,

    /// Target must be positive
    #[error("Target value must be greater than 0, got {0}")]
    InvalidTarget(i32),

    /// Progress may not go negative
    #[error("Progress must be 0 or more, got {0}")]
    NegativeProgress(i32),
}

impl GoalError {
    /// Category used to pick the HTTP status
    pub fn kind(&self) -> ErrorKind {
        match self {
            GoalError::Database(_) => ErrorKind::Store,
            GoalError::UserNotFound(_) | GoalError::GoalNotFound(_) => ErrorKind::NotFound,
            GoalError::MissingName
            | GoalError::NulInName
            | GoalError::InvalidTarget(_)
            | GoalError::NegativeProgress(_) => ErrorKind::Validation,
        }
    }

    /// Get a client-safe error message that doesn't leak sensitive information
    pub fn client_message(&self) -> String {
        match self {
            GoalError::Database(_) => "Internal server error".to_string(),
            GoalError::UserNotFound(_) => "User not found".to_string(),
            GoalError::GoalNotFound(_) => "Goal not found".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Result type for goal operations
pub type GoalResult<T> = Result<T, GoalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_error_kinds() {
        assert_eq!(GoalError::GoalNotFound(3).kind(), ErrorKind::NotFound);
        assert_eq!(GoalError::GoalNotFound(3).client_message(), "Goal not found");
        assert_eq!(GoalError::NegativeProgress(-1).kind(), ErrorKind::Validation);
        assert_eq!(GoalError::InvalidTarget(0).kind(), ErrorKind::Validation);
        assert_eq!(GoalError::NulInName.kind(), ErrorKind::Validation);
    }
}

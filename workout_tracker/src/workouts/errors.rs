//! Workout ledger error types.

use crate::errors::ErrorKind;
use thiserror::Error;

/// Workout ledger errors
#[derive(Debug, Error)]
pub enum WorkoutError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Owning user does not exist
    #[error("User {0} not found")]
    UserNotFound(i64),

    /// Workout does not exist
    #[error("Workout {0} not found")]
    WorkoutNotFound(i64),

    /// Exercise name missing or blank
    #[error("Exercise name is required")]
    MissingExerciseName,

    /// Sets must be positive
    #[error("Sets must be greater than 0, got {0}")]
    InvalidSets(i32),

    /// Reps must be positive
    #[error("Reps must be greater than 0, got {0}")]
    InvalidReps(i32),

    /// Weight must be a finite, non-negative number
    #[error("Weight must be 0 or more, got {0}")]
    InvalidWeight(f64),

    /// Duration must be non-negative
    #[error("Duration must be 0 or more minutes, got {0}")]
    InvalidDuration(i32),

    /// Difficulty outside easy/moderate/hard/extreme
    #[error("Invalid difficulty '{0}': expected easy, moderate, hard or extreme")]
    InvalidDifficulty(String),

    /// Text field holds a NUL character
    #[error("{0} must not contain NUL characters")]
    NulInText(&'static str),

    /// Time of day not in HH:MM or HH:MM:SS form
    #[error("Invalid workout time '{0}': expected HH:MM")]
    InvalidWorkoutTime(String),
}

impl WorkoutError {
    /// Category used to pick the HTTP status
    pub fn kind(&self) -> ErrorKind {
        match self {
            WorkoutError::Database(_) => ErrorKind::Store,
            WorkoutError::UserNotFound(_) | WorkoutError::WorkoutNotFound(_) => ErrorKind::NotFound,
            _ => ErrorKind::Validation,
        }
    }

    /// Get a client-safe error message that doesn't leak sensitive information
    pub fn client_message(&self) -> String {
        match self {
            WorkoutError::Database(_) => "Internal server error".to_string(),
            WorkoutError::UserNotFound(_) => "User not found".to_string(),
            WorkoutError::WorkoutNotFound(_) => "Workout not found".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Result type for workout ledger operations
pub type WorkoutResult<T> = Result<T, WorkoutError>;

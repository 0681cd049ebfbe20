//! Analytics error types.

use crate::db::timeouts::TimeoutError;
use crate::errors::ErrorKind;
use std::time::Duration;
use thiserror::Error;

/// Analytics errors
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Aggregate query exceeded its time budget
    #[error("Query timed out after {0:?}")]
    Timeout(Duration),
}

impl From<TimeoutError> for AnalyticsError {
    fn from(err: TimeoutError) -> Self {
        match err {
            TimeoutError::Timeout(duration) => AnalyticsError::Timeout(duration),
            TimeoutError::Database(e) => AnalyticsError::Database(e),
        }
    }
}

impl AnalyticsError {
    /// Category used to pick the HTTP status
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Store
    }

    /// Get a client-safe error message that doesn't leak sensitive information
    pub fn client_message(&self) -> String {
        match self {
            AnalyticsError::Database(_) => "Database error".to_string(),
            AnalyticsError::Timeout(_) => "Query timed out".to_string(),
        }
    }
}

/// Result type for analytics operations
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_conversion() {
        let err: AnalyticsError = TimeoutError::Timeout(Duration::from_secs(5)).into();
        assert!(matches!(err, AnalyticsError::Timeout(_)));
        assert_eq!(err.kind(), ErrorKind::Store);
        assert_eq!(err.client_message(), "Query timed out");
    }

    #[test]
    fn test_database_error_sanitized() {
        let err: AnalyticsError = TimeoutError::Database(sqlx::Error::PoolClosed).into();
        assert_eq!(err.client_message(), "Database error");
    }
}

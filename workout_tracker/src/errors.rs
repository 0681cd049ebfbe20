//! Error taxonomy shared by every service.
//!
//! Each service keeps its own error enum; `ErrorKind` is the coarse category
//! the HTTP layer turns into a status code.

/// Coarse error category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed, missing or out-of-range input
    Validation,
    /// Bad credentials or token
    Auth,
    /// Referenced id does not exist
    NotFound,
    /// Uniqueness violation
    Conflict,
    /// Persistence failure or aborted transaction
    Store,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Validation => write!(f, "validation"),
            ErrorKind::Auth => write!(f, "auth"),
            ErrorKind::NotFound => write!(f, "not_found"),
            ErrorKind::Conflict => write!(f, "conflict"),
            ErrorKind::Store => write!(f, "store"),
        }
    }
}

/// Returns the violated constraint name if `err` is a unique violation.
pub(crate) fn unique_violation(err: &sqlx::Error) -> Option<String> {
    let db_err = err.as_database_error()?;
    if db_err.is_unique_violation() {
        Some(db_err.constraint().unwrap_or_default().to_string())
    } else {
        None
    }
}

/// Whether `err` is a foreign key violation (owner row missing).
pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db_err| db_err.is_foreign_key_violation())
}

/// Whether `text` carries a NUL character, which PostgreSQL `TEXT` rejects.
pub(crate) fn has_nul(text: &str) -> bool {
    text.contains('\0')
}

use std::fmt;

/// Application-wide Result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Main application error type
///
/// `NotFound`, `Conflict` and `InvalidState` are distinct variants because
/// batch processing classifies them differently: an existing payroll is a
/// skip, a missing salary is an error, and neither should look like a
/// generic failure to the caller.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Validation errors for business rules
    #[error("Validation error: {0}")]
    Validation(String),

    /// Referenced period, employee or record does not exist for the tenant
    #[error("Not found: {0}")]
    NotFound(String),

    /// A record that must be unique already exists
    #[error("Conflict: {0}")]
    Conflict(String),

    /// An entity is not in a state that allows the operation
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Database operation errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

// Helper functions for common error scenarios
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        AppError::NotFound(resource.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        AppError::Conflict(msg.into())
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        AppError::InvalidState(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        AppError::Configuration(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    /// True for duplicate-record failures, used by the batch path to tell
    /// "already processed" apart from real errors.
    pub fn is_conflict(&self) -> bool {
        matches!(self, AppError::Conflict(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound(_))
    }

    /// Stable machine-readable tag for external layers mapping errors to
    /// transport codes.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation(_) => ErrorKind::Validation,
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::Conflict(_) => ErrorKind::Conflict,
            AppError::InvalidState(_) => ErrorKind::InvalidState,
            AppError::Database(_) => ErrorKind::Internal,
            AppError::Configuration(_) => ErrorKind::Internal,
            AppError::Internal(_) => ErrorKind::Internal,
        }
    }
}

/// Coarse error classification exposed to collaborating layers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    InvalidState,
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Validation => write!(f, "validation"),
            ErrorKind::NotFound => write!(f, "not_found"),
            ErrorKind::Conflict => write!(f, "conflict"),
            ErrorKind::InvalidState => write!(f, "invalid_state"),
            ErrorKind::Internal => write!(f, "internal"),
        }
    }
}

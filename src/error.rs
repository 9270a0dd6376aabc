//! Error types for the service call logger.
//!
//! This module defines custom error types using `thiserror` for precise error handling.
//! The interceptor itself never produces errors; these belong to configuration and to
//! the service layer it wraps.

use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Errors raised by the persistence layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// Row was not found
    #[error("Row not found: {0}")]
    NotFound(u64),

    /// Storage lock was poisoned by a panicking writer
    #[error("Storage unavailable")]
    Unavailable,

    /// Unique constraint violated
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

/// Errors raised by the service layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Entity not found
    #[error("Employee not found: {0}")]
    NotFound(u64),

    /// Request failed validation
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Underlying repository failure
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with RepositoryError
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Convenience type alias for Results with ServiceError
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConfigError::InvalidValue {
            var: "SERVICE_LOG_NAMESPACE".to_string(),
            reason: "Cannot be empty".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for SERVICE_LOG_NAMESPACE: Cannot be empty"
        );

        let err = RepositoryError::NotFound(7);
        assert_eq!(err.to_string(), "Row not found: 7");

        let err = ServiceError::InvalidRequest("name is empty".to_string());
        assert_eq!(err.to_string(), "Invalid request: name is empty");
    }

    #[test]
    fn test_repository_error_converts_into_service_error() {
        let err: ServiceError = RepositoryError::Unavailable.into();
        assert_eq!(err, ServiceError::Repository(RepositoryError::Unavailable));
        assert_eq!(err.to_string(), "Repository error: Storage unavailable");
    }
}

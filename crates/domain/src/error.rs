//! Domain error taxonomy shared by all planner services.

use thiserror::Error;

/// Errors raised by the user, team and board services.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Malformed or oversized input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A uniqueness rule was violated.
    #[error("Duplicate name: {0}")]
    DuplicateName(String),

    /// A referenced entity does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The team membership limit would be exceeded.
    #[error("Capacity exceeded: {0}")]
    CapacityExceeded(String),

    /// Illegal state transition or forbidden operation.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Unexpected storage or I/O failure.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn invalid_operation(msg: impl Into<String>) -> Self {
        Self::InvalidOperation(msg.into())
    }
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |err| match &err.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{}: invalid value", field),
                })
            })
            .collect();
        messages.sort();

        DomainError::Validation(messages.join(", "))
    }
}

/// Result alias used by the service traits.
pub type DomainResult<T> = Result<T, DomainError>;

//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is a deterministic business failure. A failed operation
/// never leaves the aggregate partially modified.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An argument was missing or malformed (e.g. an order without lines).
    #[error("validation failed: {0}")]
    Validation(String),

    /// The operation is not allowed in the aggregate's current state.
    #[error("illegal state: {0}")]
    IllegalState(String),

    /// A domain invariant was violated (e.g. a command routed to the wrong aggregate).
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn illegal_state(msg: impl Into<String>) -> Self {
        Self::IllegalState(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    /// True for the invalid-argument family of failures.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// True when the aggregate's state refused the operation.
    pub fn is_illegal_state(&self) -> bool {
        matches!(self, Self::IllegalState(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_and_message() {
        let err = DomainError::illegal_state("shipping info cannot be changed");
        assert_eq!(err.to_string(), "illegal state: shipping info cannot be changed");

        let err = DomainError::validation("shipping info is required");
        assert_eq!(err.to_string(), "validation failed: shipping info is required");
    }

    #[test]
    fn kind_predicates() {
        assert!(DomainError::validation("x").is_validation());
        assert!(!DomainError::validation("x").is_illegal_state());
        assert!(DomainError::illegal_state("x").is_illegal_state());
        assert!(!DomainError::invariant("x").is_validation());
    }
}

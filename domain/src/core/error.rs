//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Query cannot be empty")]
    EmptyQuery,

    #[error("Invalid model id: {0:?}")]
    InvalidModel(String),

    #[error("Invalid model role: {0}")]
    InvalidRole(String),

    #[error("Invalid persona: {0}")]
    InvalidPersona(String),

    #[error("Duplicate persona: {0}")]
    DuplicatePersona(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(DomainError::EmptyQuery.to_string(), "Query cannot be empty");
        assert_eq!(
            DomainError::InvalidRole("judge".to_string()).to_string(),
            "Invalid model role: judge"
        );
        assert_eq!(
            DomainError::DuplicatePersona("The Skeptic".to_string()).to_string(),
            "Duplicate persona: The Skeptic"
        );
    }
}

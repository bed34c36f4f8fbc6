//! Query value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// A query to be answered by the council (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    content: String,
}

impl Query {
    /// Create a query, returning an error if it is empty or only whitespace
    pub fn try_new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            Err(DomainError::EmptyQuery)
        } else {
            Ok(Self { content })
        }
    }

    /// Get the query content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

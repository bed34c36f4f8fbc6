//! Model identifier value object

use crate::core::error::DomainError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Provider model identifier (Value Object)
///
/// Identifiers are opaque strings such as `"tngtech/deepseek-r1t-chimera:free"`;
/// the council never interprets them beyond passing them to the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(try_from = "String", into = "String")]
pub struct ModelId(String);

impl ModelId {
    /// Create a model id, rejecting empty or whitespace-only strings.
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidModel(id));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Built-in identifiers known to be non-empty.
    pub(crate) fn from_static(id: &'static str) -> Self {
        Self(id.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ModelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ModelId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ModelId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ModelId> for String {
    fn from(id: ModelId) -> Self {
        id.0
    }
}

//! Configuration issues.
//!
//! Config loading collects every problem it finds instead of stopping at
//! the first one. Each [`ConfigIssue`] carries a severity so the caller can
//! abort on errors and merely log warnings.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A model id is empty or whitespace.
    EmptyModelName { field: String },
    /// A `[models]` key is not a council role.
    UnknownModelRole { key: String },
    /// A persona has a blank name or instruction.
    InvalidPersona { index: usize },
    /// Two personas share a name.
    DuplicatePersona { name: String },
    /// A numeric setting is out of range.
    InvalidValue { field: String, value: String },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    /// Whether any issue in `issues` is fatal.
    pub fn has_errors(issues: &[ConfigIssue]) -> bool {
        issues.iter().any(|i| i.severity == Severity::Error)
    }
}

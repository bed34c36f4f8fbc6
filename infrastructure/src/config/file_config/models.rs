//! Role-based model configuration from TOML (`[models]` section)

use council_domain::{ConfigIssue, ConfigIssueCode, ModelAssignment, ModelId, ModelRole};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Role-based model configuration from TOML
///
/// Entries are merged over the built-in assignment.
///
/// # Example
///
/// ```toml
/// [models]
/// generator_1 = "nvidia/nemotron-nano-12b-v2-vl:free"
/// generator_2 = "meta-llama/llama-3.3-70b-instruct:free"
/// critic = "tngtech/deepseek-r1t-chimera:free"
/// architect = "tngtech/deepseek-r1t-chimera:free"
/// finalizer = "tngtech/deepseek-r1t2-chimera:free"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileModelsConfig {
    pub roles: BTreeMap<String, String>,
}

impl FileModelsConfig {
    /// Build the default assignment, collecting issues for bad entries.
    ///
    /// Unknown role keys are skipped with a warning; empty model ids are
    /// errors.
    pub fn to_assignment(&self) -> (ModelAssignment, Vec<ConfigIssue>) {
        let mut assignment = ModelAssignment::builtin();
        let mut issues = Vec::new();

        for (key, value) in &self.roles {
            let role: ModelRole = match key.parse() {
                Ok(role) => role,
                Err(_) => {
                    issues.push(ConfigIssue::warning(
                        ConfigIssueCode::UnknownModelRole { key: key.clone() },
                        format!(
                            "models.{}: not a council role (expected generator_<n>, critic, architect or finalizer)",
                            key
                        ),
                    ));
                    continue;
                }
            };
            match ModelId::new(value.as_str()) {
                Ok(model) => assignment = assignment.with(role, model),
                Err(_) => issues.push(ConfigIssue::error(
                    ConfigIssueCode::EmptyModelName {
                        field: format!("models.{}", key),
                    },
                    format!("models.{}: model name cannot be empty", key),
                )),
            }
        }

        (assignment, issues)
    }
}

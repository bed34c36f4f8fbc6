//! Persona registry from TOML (`[[personas]]` array)

use council_domain::{ConfigIssue, ConfigIssueCode, Persona, PersonaRegistry};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One `[[personas]]` entry
///
/// # Example
///
/// ```toml
/// [[personas]]
/// name = "The Historian"
/// instruction = "You explain everything through precedent."
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePersonaConfig {
    pub name: String,
    pub instruction: String,
}

/// Build the registry. A non-empty list replaces the built-in personas.
pub fn to_registry(personas: &[FilePersonaConfig]) -> (PersonaRegistry, Vec<ConfigIssue>) {
    if personas.is_empty() {
        return (PersonaRegistry::builtin(), Vec::new());
    }

    let mut issues = Vec::new();
    let mut seen = HashSet::new();
    let mut valid = Vec::new();

    for (index, entry) in personas.iter().enumerate() {
        let name = entry.name.trim();
        if name.is_empty() || entry.instruction.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidPersona { index },
                format!(
                    "personas[{}]: name and instruction must both be non-empty",
                    index
                ),
            ));
            continue;
        }
        if !seen.insert(name.to_string()) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::DuplicatePersona {
                    name: name.to_string(),
                },
                format!("personas[{}]: duplicate persona name '{}'", index, name),
            ));
            continue;
        }
        valid.push(Persona::new(name, entry.instruction.trim()));
    }

    // Entries were checked above; an all-invalid list keeps the built-ins
    let registry = if valid.is_empty() {
        PersonaRegistry::builtin()
    } else {
        PersonaRegistry::new(valid).unwrap_or_default()
    };
    (registry, issues)
}

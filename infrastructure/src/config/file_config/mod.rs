//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod council;
mod models;
mod output;
mod personas;
mod provider;

pub use council::FileCouncilConfig;
pub use models::FileModelsConfig;
pub use output::FileOutputConfig;
pub use personas::{FilePersonaConfig, to_registry};
pub use provider::FileProviderConfig;

use council_application::CouncilSettings;
use council_domain::ConfigIssue;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Pipeline settings
    pub council: FileCouncilConfig,
    /// OpenRouter connection settings
    pub provider: FileProviderConfig,
    /// Role-based model selection
    pub models: FileModelsConfig,
    /// Council members; replaces the built-in five when non-empty
    pub personas: Vec<FilePersonaConfig>,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// This is the single entry point for config validation. It checks:
    /// 1. Model ids and role keys in `[models]`
    /// 2. Persona names and instructions
    /// 3. Numeric ranges and the provider URL
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.models.to_assignment().1);
        issues.extend(to_registry(&self.personas).1);
        issues.extend(self.council.validate());
        issues.extend(self.provider.validate());
        issues
    }

    /// Convert into the immutable settings every run consumes.
    ///
    /// Prompt templates keep their built-in text; overrides are applied
    /// separately from `council.prompts_dir`.
    pub fn to_settings(&self) -> CouncilSettings {
        let (models, _) = self.models.to_assignment();
        let (personas, _) = to_registry(&self.personas);
        CouncilSettings::default()
            .with_personas(personas)
            .with_models(models)
            .with_default_credential(self.provider.credential())
            .with_mock_mode(self.council.mock_mode)
            .with_finalizer_chunk_size(self.council.finalizer_chunk_size)
            .with_finalizer_pacing(Duration::from_millis(self.council.finalizer_pacing_ms))
    }
}

//! Pipeline settings from TOML (`[council]` section)

use council_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

/// Raw pipeline configuration from TOML
///
/// # Example
///
/// ```toml
/// [council]
/// mock_mode = false
/// finalizer_chunk_size = 50
/// finalizer_pacing_ms = 10
/// trace = true
/// trace_dir = "logs"
/// prompts_dir = "prompts"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCouncilConfig {
    /// Serve runs from canned data instead of the provider
    #[serde(deserialize_with = "deserialize_flag")]
    pub mock_mode: bool,
    /// Characters per `finalizer_chunk` event
    pub finalizer_chunk_size: usize,
    /// Pause between `finalizer_chunk` events
    pub finalizer_pacing_ms: u64,
    /// Write a Markdown trace for each live run
    pub trace: bool,
    /// Directory receiving trace files
    pub trace_dir: PathBuf,
    /// Directory with prompt template overrides
    pub prompts_dir: Option<PathBuf>,
}

impl Default for FileCouncilConfig {
    fn default() -> Self {
        Self {
            mock_mode: true,
            finalizer_chunk_size: 50,
            finalizer_pacing_ms: 10,
            trace: true,
            trace_dir: PathBuf::from("logs"),
            prompts_dir: None,
        }
    }
}

impl FileCouncilConfig {
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.finalizer_chunk_size == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidValue {
                    field: "council.finalizer_chunk_size".to_string(),
                    value: "0".to_string(),
                },
                "council.finalizer_chunk_size must be at least 1",
            ));
        }
        issues
    }
}

/// Accept `true`/`false` as well as the strings environment variables
/// carry (`"True"`, `"1"`, `"yes"`, ...).
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
        Text(String),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => Ok(b),
        Flag::Int(i) => Ok(i != 0),
        Flag::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" | "" => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "expected a boolean, found '{}'",
                other
            ))),
        },
    }
}

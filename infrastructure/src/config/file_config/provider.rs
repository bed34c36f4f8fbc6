//! Provider configuration from TOML (`[provider]` section)

use crate::openrouter::{DEFAULT_BASE_URL, OpenRouterConfig};
use council_application::ApiCredential;
use council_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// OpenRouter connection settings.
///
/// The API key is usually supplied through `OPENROUTER_API_KEY` rather
/// than written into a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Default API key when a run supplies none
    pub api_key: Option<String>,
    /// API root (default: "https://openrouter.ai/api/v1")
    pub base_url: String,
    /// Sent as `HTTP-Referer`
    pub site_url: String,
    /// Sent as `X-Title`
    pub app_name: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            site_url: "https://llm-council.local".to_string(),
            app_name: "LLM Council".to_string(),
            timeout_secs: 120,
        }
    }
}

impl FileProviderConfig {
    pub fn credential(&self) -> Option<ApiCredential> {
        self.api_key.as_deref().and_then(ApiCredential::new)
    }

    pub fn to_openrouter_config(&self) -> OpenRouterConfig {
        OpenRouterConfig {
            base_url: self.base_url.clone(),
            site_url: self.site_url.clone(),
            app_name: self.app_name.clone(),
            timeout: Duration::from_secs(self.timeout_secs.max(1)),
        }
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidValue {
                    field: "provider.base_url".to_string(),
                    value: self.base_url.clone(),
                },
                format!(
                    "provider.base_url: '{}' is not an http(s) URL",
                    self.base_url
                ),
            ));
        }
        if self.timeout_secs == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::InvalidValue {
                    field: "provider.timeout_secs".to_string(),
                    value: "0".to_string(),
                },
                "provider.timeout_secs: 0 is not allowed, using 1 second",
            ));
        }
        issues
    }
}

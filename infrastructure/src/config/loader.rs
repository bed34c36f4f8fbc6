//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// Project-level config file names, checked in order.
const PROJECT_FILES: [&str; 2] = ["council.toml", ".council.toml"];

/// Environment variables understood for compatibility with older deployments.
const LEGACY_ENV: [(&str, &str); 5] = [
    ("OPENROUTER_API_KEY", "provider.api_key"),
    ("OPENROUTER_BASE_URL", "provider.base_url"),
    ("OPENROUTER_SITE_URL", "provider.site_url"),
    ("OPENROUTER_APP_NAME", "provider.app_name"),
    ("USE_MOCK_MODE", "council.mock_mode"),
];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Legacy variables (`OPENROUTER_API_KEY`, `USE_MOCK_MODE`, ...)
    /// 2. `COUNCIL_` environment variables (`__` separates sections)
    /// 3. Explicit config path (if provided)
    /// 4. Project root: `./council.toml` or `./.council.toml`
    /// 5. Global: `~/.config/llm-council/config.toml`
    /// 6. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(config_path).extract_lossy().map_err(Box::new)
    }

    /// Build the layered figment without extracting it.
    pub fn figment(config_path: Option<&PathBuf>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment
            .merge(Env::prefixed("COUNCIL_").split("__"))
            .merge(Self::legacy_env())
    }

    /// Map the legacy variables onto their config keys.
    fn legacy_env() -> Env {
        let names: Vec<&str> = LEGACY_ENV.iter().map(|(name, _)| *name).collect();
        Env::raw().only(&names).map(|key| {
            LEGACY_ENV
                .iter()
                .find(|(name, _)| key.as_str().eq_ignore_ascii_case(name))
                .map(|(_, target)| (*target).into())
                .unwrap_or_else(|| key.as_str().to_string().into())
        })
    }

    /// Load only default configuration (for --no-config)
    ///
    /// Environment variables still apply so a bare run can pick up its key.
    /// Booleans and numbers from the environment are read leniently
    /// (`USE_MOCK_MODE=False` is `false`).
    pub fn load_defaults() -> Result<FileConfig, Box<figment::Error>> {
        Figment::new()
            .merge(Serialized::defaults(FileConfig::default()))
            .merge(Env::prefixed("COUNCIL_").split("__"))
            .merge(Self::legacy_env())
            .extract_lossy()
            .map_err(Box::new)
    }

    /// Get the global config file path
    ///
    /// Returns `<config dir>/llm-council/config.toml`
    /// (e.g. `~/.config/llm-council/config.toml` on Linux).
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("llm-council").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Describe the config sources being used (for `--show-config`)
    pub fn describe_sources(explicit: Option<&Path>) -> Vec<String> {
        let mut lines = vec!["Configuration sources (in priority order):".to_string()];

        let set: Vec<&str> = LEGACY_ENV
            .iter()
            .map(|(name, _)| *name)
            .filter(|name| std::env::var_os(name).is_some())
            .collect();
        if set.is_empty() {
            lines.push("  [     ] Environment: COUNCIL_*, OPENROUTER_*, USE_MOCK_MODE".to_string());
        } else {
            lines.push(format!("  [FOUND] Environment: {}", set.join(", ")));
        }

        if let Some(path) = explicit {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            lines.push(format!("  [{:<5}] Explicit: {}", mark, path.display()));
        }

        match Self::project_config_path() {
            Some(path) => lines.push(format!("  [FOUND] Project: {}", path.display())),
            None => lines.push("  [     ] Project: ./council.toml or ./.council.toml".to_string()),
        }

        if let Some(path) = Self::global_config_path() {
            let mark = if path.exists() { "FOUND" } else { "     " };
            lines.push(format!("  [{}] Global:  {}", mark, path.display()));
        }

        lines.push("  [     ] Default: built-in defaults".to_string());
        lines
    }
}

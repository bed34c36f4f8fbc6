//! Configuration file loading for llm-council
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Legacy environment variables (`OPENROUTER_API_KEY`, `USE_MOCK_MODE`, ...)
//! 2. `COUNCIL_*` environment variables
//! 3. `--config <path>` specified file
//! 4. Project root: `./council.toml` or `./.council.toml`
//! 5. Global: `~/.config/llm-council/config.toml`
//! 6. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileCouncilConfig, FileModelsConfig, FileOutputConfig, FilePersonaConfig,
    FileProviderConfig,
};
pub use loader::ConfigLoader;

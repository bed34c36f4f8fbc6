//! Infrastructure layer for llm-council
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the OpenRouter gateway, the Markdown trace
//! recorder, configuration file loading and prompt overrides.

pub mod config;
pub mod logging;
pub mod openrouter;
pub mod prompts;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileConfig, FileCouncilConfig, FileModelsConfig, FileOutputConfig,
    FilePersonaConfig, FileProviderConfig,
};
pub use logging::{MarkdownTraceFactory, MarkdownTraceRecorder, redact_secrets};
pub use openrouter::{DEFAULT_BASE_URL, OpenRouterConfig, OpenRouterGateway};
pub use prompts::{PromptLoadError, PromptLoader};

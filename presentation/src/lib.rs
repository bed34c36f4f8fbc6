//! Presentation layer for llm-council
//!
//! This crate contains the CLI definition, event stream renderers
//! and stage progress bars.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormatArg, parse_model_overrides};
pub use output::console::ConsoleRenderer;
pub use output::info::{defaults_json, format_agent_list};
pub use output::outcome::RunOutcome;
pub use output::renderer::{
    EventRenderer, FinalRenderer, JsonLinesRenderer, SseRenderer, renderer_for,
};
pub use progress::reporter::StageProgress;

//! Prompt template loading

mod loader;

pub use loader::{PromptLoadError, PromptLoader};

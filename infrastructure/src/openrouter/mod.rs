//! OpenRouter provider adapter.
//!
//! Implements [`LlmGateway`](council_application::LlmGateway) over the
//! OpenAI-compatible `chat/completions` API, with structured output
//! schemas generated from the domain types.

mod gateway;
mod wire;

pub use gateway::{DEFAULT_BASE_URL, OpenRouterConfig, OpenRouterGateway};

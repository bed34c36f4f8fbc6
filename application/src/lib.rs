//! Application layer for llm-council
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{CouncilSettings, MockPacing};
pub use ports::{
    llm_gateway::{
        ApiCredential, Completion, CompletionRequest, GatewayError, LlmGateway, OutputContract,
    },
    trace_sink::{NoTrace, TraceFactory, TraceSink},
};
pub use use_cases::run_council::{
    EventEmitter, MockCouncilDriver, RunCouncilError, RunCouncilInput, RunCouncilUseCase, RunPlan,
};

//! Outbound council events.
//!
//! Every run produces an ordered sequence of these. A successful run looks
//! like: `generator_start`/`generator_chunk` per agent, one or more
//! `critic_result`, one `architect_result`, one or more `finalizer_chunk`,
//! then `done`. An aborted run ends with a single `error` instead.

use crate::council::value_objects::{Blueprint, CritiqueResult};
use serde_json::{Value, json};

/// A typed event with a JSON payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CouncilEvent {
    GeneratorStart { agent: String, model: String },
    GeneratorChunk { agent: String, chunk: String },
    CriticResult(CritiqueResult),
    ArchitectResult(Blueprint),
    FinalizerChunk { chunk: String },
    Done,
    Error { message: String },
}

impl CouncilEvent {
    pub fn error(message: impl Into<String>) -> Self {
        CouncilEvent::Error {
            message: message.into(),
        }
    }

    /// Wire name of the event
    pub fn name(&self) -> &'static str {
        match self {
            CouncilEvent::GeneratorStart { .. } => "generator_start",
            CouncilEvent::GeneratorChunk { .. } => "generator_chunk",
            CouncilEvent::CriticResult(_) => "critic_result",
            CouncilEvent::ArchitectResult(_) => "architect_result",
            CouncilEvent::FinalizerChunk { .. } => "finalizer_chunk",
            CouncilEvent::Done => "done",
            CouncilEvent::Error { .. } => "error",
        }
    }

    /// JSON payload carried by the event
    pub fn payload(&self) -> Value {
        match self {
            CouncilEvent::GeneratorStart { agent, model } => {
                json!({ "agent": agent, "model": model })
            }
            CouncilEvent::GeneratorChunk { agent, chunk } => {
                json!({ "agent": agent, "chunk": chunk })
            }
            CouncilEvent::CriticResult(verdict) => {
                serde_json::to_value(verdict).unwrap_or_else(|_| json!({}))
            }
            CouncilEvent::ArchitectResult(blueprint) => {
                serde_json::to_value(blueprint).unwrap_or_else(|_| json!({}))
            }
            CouncilEvent::FinalizerChunk { chunk } => json!({ "chunk": chunk }),
            CouncilEvent::Done => json!({}),
            CouncilEvent::Error { message } => json!({ "message": message }),
        }
    }

    /// Whether the event ends the stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, CouncilEvent::Done | CouncilEvent::Error { .. })
    }

    /// Encode as a Server-Sent Events frame.
    pub fn to_sse(&self) -> String {
        format!("event: {}\ndata: {}\n\n", self.name(), self.payload())
    }

    /// Encode as a single JSON line (no trailing newline).
    pub fn to_json_line(&self) -> String {
        json!({ "event": self.name(), "data": self.payload() }).to_string()
    }
}

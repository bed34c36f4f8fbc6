//! Output format value object

use serde::{Deserialize, Serialize};

/// How a run's event stream is presented to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable rendering of every stage (default)
    #[default]
    Console,
    /// Raw Server-Sent Events frames
    Sse,
    /// One JSON object per event
    Jsonl,
    /// Only the final answer text
    Final,
}

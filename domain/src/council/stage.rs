//! Pipeline stages

use serde::{Deserialize, Serialize};

/// Stage of a council run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// Parallel drafting by every active persona
    Generation,
    /// Batched judging of the drafts
    Critique,
    /// Structural blueprint synthesis
    Architect,
    /// Final answer synthesis
    Finalizer,
}

impl Stage {
    pub const ALL: [Stage; 4] = [
        Stage::Generation,
        Stage::Critique,
        Stage::Architect,
        Stage::Finalizer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Generation => "generation",
            Stage::Critique => "critique",
            Stage::Architect => "architect",
            Stage::Finalizer => "finalizer",
        }
    }

    /// Phase name used in the flight-recorder trace
    pub fn trace_phase(&self) -> &'static str {
        match self {
            Stage::Generation => "Generators",
            Stage::Critique => "Critics",
            Stage::Architect => "Architect",
            Stage::Finalizer => "Finalizer",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Stage::Generation => "Stage 1: Generators",
            Stage::Critique => "Stage 2: Critic",
            Stage::Architect => "Stage 3: Architect",
            Stage::Finalizer => "Stage 4: Finalizer",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_names() {
        assert_eq!(Stage::Critique.as_str(), "critique");
        assert_eq!(Stage::Critique.trace_phase(), "Critics");
        assert_eq!(Stage::Finalizer.to_string(), "finalizer");
        assert_eq!(Stage::ALL.len(), 4);
    }
}

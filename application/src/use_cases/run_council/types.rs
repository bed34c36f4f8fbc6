//! Input and error types for the RunCouncil use case.

use crate::ports::llm_gateway::{ApiCredential, GatewayError};
use council_domain::{ModelOverrides, Query, Stage};
use thiserror::Error;

/// Errors that abort a council run.
///
/// Each variant except [`Cancelled`](RunCouncilError::Cancelled) is reported
/// to the consumer as exactly one `error` event.
#[derive(Error, Debug)]
pub enum RunCouncilError {
    #[error("No valid agents selected.")]
    NoActiveAgents,

    #[error("No API credential available. Pass one with the request or configure a default.")]
    MissingCredential,

    #[error("No model assigned for role {0}")]
    NoModelAssigned(String),

    #[error("Generator {agent} failed: {source}")]
    Generation {
        agent: String,
        #[source]
        source: GatewayError,
    },

    #[error("{stage} stage failed: {source}")]
    Stage {
        stage: Stage,
        #[source]
        source: GatewayError,
    },

    #[error("Operation cancelled")]
    Cancelled,
}

impl RunCouncilError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RunCouncilError::Cancelled)
    }

    /// The stage in which the run failed, when it failed inside one.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            RunCouncilError::Generation { .. } => Some(Stage::Generation),
            RunCouncilError::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

/// Input for the RunCouncil use case
#[derive(Debug, Clone)]
pub struct RunCouncilInput {
    /// The question put to the council
    pub query: Query,
    /// Requested persona ids, in order. Unknown ids are dropped.
    pub agents: Vec<String>,
    /// Per-run credential; falls back to the configured default
    pub credential: Option<ApiCredential>,
    /// Per-run model overrides keyed by persona id or role key
    pub models: ModelOverrides,
}

impl RunCouncilInput {
    pub fn new(query: Query, agents: Vec<String>) -> Self {
        Self {
            query,
            agents,
            credential: None,
            models: ModelOverrides::default(),
        }
    }

    pub fn with_credential(mut self, credential: Option<ApiCredential>) -> Self {
        self.credential = credential;
        self
    }

    pub fn with_models(mut self, models: ModelOverrides) -> Self {
        self.models = models;
        self
    }
}

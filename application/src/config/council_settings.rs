//! Council settings - what a run is allowed to draw on.
//!
//! [`CouncilSettings`] groups the static inputs every run consumes: the
//! persona registry, default model assignment, prompt templates, the
//! default credential, and finalizer/mock pacing. These are
//! application-layer concerns, not domain policy.

use crate::ports::llm_gateway::ApiCredential;
use council_domain::{ModelAssignment, PersonaRegistry, PromptTemplates};
use std::time::Duration;

/// Default length, in characters, of one `finalizer_chunk`.
pub const DEFAULT_FINALIZER_CHUNK_SIZE: usize = 50;

/// Default pause between two `finalizer_chunk` events.
pub const DEFAULT_FINALIZER_PACING: Duration = Duration::from_millis(10);

/// Artificial delays used by the mock driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockPacing {
    /// Pause after each `generator_start`
    pub generator_start: Duration,
    /// Pause between generator chunks
    pub generator_chunk: Duration,
    /// Pause between stages
    pub stage: Duration,
    /// Pause between finalizer chunks
    pub finalizer_chunk: Duration,
}

impl Default for MockPacing {
    fn default() -> Self {
        Self {
            generator_start: Duration::from_millis(500),
            generator_chunk: Duration::from_millis(100),
            stage: Duration::from_secs(1),
            finalizer_chunk: Duration::from_millis(50),
        }
    }
}

impl MockPacing {
    /// No delays at all.
    pub fn none() -> Self {
        Self {
            generator_start: Duration::ZERO,
            generator_chunk: Duration::ZERO,
            stage: Duration::ZERO,
            finalizer_chunk: Duration::ZERO,
        }
    }
}

/// Static configuration consumed by every council run.
#[derive(Debug, Clone)]
pub struct CouncilSettings {
    pub personas: PersonaRegistry,
    pub models: ModelAssignment,
    pub prompts: PromptTemplates,
    /// Used when a request carries no credential of its own
    pub default_credential: Option<ApiCredential>,
    /// Serve runs from the canned mock driver instead of the provider
    pub mock_mode: bool,
    pub finalizer_chunk_size: usize,
    pub finalizer_pacing: Duration,
    pub mock_pacing: MockPacing,
}

impl Default for CouncilSettings {
    fn default() -> Self {
        Self {
            personas: PersonaRegistry::builtin(),
            models: ModelAssignment::builtin(),
            prompts: PromptTemplates::builtin(),
            default_credential: None,
            mock_mode: false,
            finalizer_chunk_size: DEFAULT_FINALIZER_CHUNK_SIZE,
            finalizer_pacing: DEFAULT_FINALIZER_PACING,
            mock_pacing: MockPacing::default(),
        }
    }
}

impl CouncilSettings {
    // ==================== Builder Methods ====================

    pub fn with_personas(mut self, personas: PersonaRegistry) -> Self {
        self.personas = personas;
        self
    }

    pub fn with_models(mut self, models: ModelAssignment) -> Self {
        self.models = models;
        self
    }

    pub fn with_prompts(mut self, prompts: PromptTemplates) -> Self {
        self.prompts = prompts;
        self
    }

    pub fn with_default_credential(mut self, credential: Option<ApiCredential>) -> Self {
        self.default_credential = credential;
        self
    }

    pub fn with_mock_mode(mut self, mock_mode: bool) -> Self {
        self.mock_mode = mock_mode;
        self
    }

    /// Set the finalizer chunk size. Zero is treated as one.
    pub fn with_finalizer_chunk_size(mut self, size: usize) -> Self {
        self.finalizer_chunk_size = size.max(1);
        self
    }

    pub fn with_finalizer_pacing(mut self, pacing: Duration) -> Self {
        self.finalizer_pacing = pacing;
        self
    }

    pub fn with_mock_pacing(mut self, pacing: MockPacing) -> Self {
        self.mock_pacing = pacing;
        self
    }
}

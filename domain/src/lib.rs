//! Domain layer for llm-council
//!
//! This crate contains the core business rules, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Council
//!
//! A council run puts one query before several personas and refines their
//! drafts in four stages:
//!
//! 1. **Generation**: every active persona drafts an answer in parallel
//! 2. **Critique**: drafts are judged in batches of three; each batch names a winner
//! 3. **Architect**: the best draft and all critiques become a structural [`Blueprint`]
//! 4. **Finalizer**: the blueprint and best draft become the final answer
//!
//! Progress is exposed as an ordered stream of [`CouncilEvent`]s.

pub mod assignment;
pub mod config;
pub mod core;
pub mod council;
pub mod persona;
pub mod prompt;
pub mod util;

// Re-export commonly used types
pub use assignment::{ModelAssignment, ModelOverrides, ModelRole};
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::{error::DomainError, model::ModelId, query::Query};
pub use council::{
    batch::{CRITIQUE_BATCH_SIZE, CritiqueBatch, batch_count, partition},
    event::CouncilEvent,
    stage::Stage,
    value_objects::{
        BestDraft, Blueprint, CouncilTranscript, CritiqueResult, FALLBACK_WINNER_ID,
        GenerationResult, TokenUsage,
    },
    verdict::{Verdict, parse_blueprint, parse_critique},
};
pub use persona::{Persona, PersonaRegistry, PersonaSelection};
pub use prompt::{PromptKind, PromptTemplates};

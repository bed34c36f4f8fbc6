//! Council value objects - immutable per-run artifacts.
//!
//! - [`GenerationResult`] - one persona's draft from the generation stage
//! - [`CritiqueResult`] - one judging verdict over a batch of drafts
//! - [`Blueprint`] - the architect's structural plan
//! - [`BestDraft`] - the draft carried into architect and finalizer
//! - [`CouncilTranscript`] - everything a completed run produced

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Winner id reported when a judge verdict could not be used.
pub const FALLBACK_WINNER_ID: &str = "Default (First in Batch)";

/// Reasoning reported when a judge verdict could not be used.
pub const FALLBACK_REASONING: &str = "parse failure";

/// Structure line of the placeholder blueprint.
pub const DEGRADED_BLUEPRINT_STRUCTURE: &str = "Error parsing architect";

/// Token accounting reported by the provider for one call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt: u64,
    pub completion: u64,
    pub total: u64,
}

impl TokenUsage {
    pub fn new(prompt: u64, completion: u64) -> Self {
        Self {
            prompt,
            completion,
            total: prompt + completion,
        }
    }
}

/// Draft produced by one persona in the generation stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    /// Persona identifier
    pub agent: String,
    /// Generated draft text
    pub text: String,
    /// Provider token usage
    pub usage: TokenUsage,
}

impl GenerationResult {
    pub fn new(agent: impl Into<String>, text: impl Into<String>, usage: TokenUsage) -> Self {
        Self {
            agent: agent.into(),
            text: text.into(),
            usage,
        }
    }
}

/// Judge verdict over one batch of drafts.
///
/// This is also the structured-output contract handed to the judging model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CritiqueResult {
    /// The ID of the winning response
    pub winner_id: String,
    /// List of IDs ordered from best to worst
    pub rankings: Vec<String>,
    /// Why the first place winner was chosen
    pub reasoning: String,
    /// A dictionary mapping agent IDs to their specific flaws
    pub flaws: BTreeMap<String, String>,
    /// A dictionary mapping agent IDs to their numeric scores (1-10)
    #[serde(deserialize_with = "deserialize_scores")]
    #[schemars(with = "BTreeMap<String, u8>")]
    pub scores: BTreeMap<String, u8>,
}

impl CritiqueResult {
    /// Verdict for a single-agent run: the sole agent wins outright.
    pub fn auto_win(agent: &str) -> Self {
        Self {
            winner_id: agent.to_string(),
            rankings: vec![agent.to_string()],
            reasoning: "Solo execution - automatic winner.".to_string(),
            flaws: BTreeMap::from([(agent.to_string(), "N/A".to_string())]),
            scores: BTreeMap::from([(agent.to_string(), 10)]),
        }
    }

    /// Substitute verdict used when a judge call fails or its output is unusable.
    pub fn fallback(batch_ids: &[&str]) -> Self {
        Self {
            winner_id: FALLBACK_WINNER_ID.to_string(),
            rankings: batch_ids.iter().map(|id| id.to_string()).collect(),
            reasoning: FALLBACK_REASONING.to_string(),
            flaws: BTreeMap::new(),
            scores: BTreeMap::new(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.winner_id == FALLBACK_WINNER_ID && self.reasoning == FALLBACK_REASONING
    }
}

/// Accept integer or fractional scores and clamp them into 1..=10.
fn deserialize_scores<'de, D>(deserializer: D) -> Result<BTreeMap<String, u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, f64>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(id, score)| (id, score.round().clamp(1.0, 10.0) as u8))
        .collect())
}

/// Structural plan produced by the architect stage.
///
/// This is also the structured-output contract handed to the architect model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Blueprint {
    /// Ordered list of section headers with instructions
    pub structure: Vec<String>,
    /// Voice and style instructions
    pub tone_guidelines: String,
    /// Specific facts or corrections to inject
    #[serde(default)]
    pub missing_facts_to_add: Vec<String>,
    /// Strategy for merging critique feedback
    #[serde(default)]
    pub critique_integration: String,
}

impl Blueprint {
    /// Placeholder used when the architect output cannot be parsed.
    pub fn degraded() -> Self {
        Self {
            structure: vec![DEGRADED_BLUEPRINT_STRUCTURE.to_string()],
            tone_guidelines: String::new(),
            missing_facts_to_add: Vec::new(),
            critique_integration: String::new(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.structure.len() == 1 && self.structure[0] == DEGRADED_BLUEPRINT_STRUCTURE
    }
}

/// The draft carried forward as context for architect and finalizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestDraft {
    pub agent: String,
    pub text: String,
}

impl BestDraft {
    pub fn from_result(result: &GenerationResult) -> Self {
        Self {
            agent: result.agent.clone(),
            text: result.text.clone(),
        }
    }
}

/// Complete record of a successful council run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouncilTranscript {
    /// The original query
    pub query: String,
    /// Active agents, in selection order
    pub agents: Vec<String>,
    /// Generation stage output, in selection order
    pub generations: Vec<GenerationResult>,
    /// One verdict per batch (or the auto-win verdict)
    pub critiques: Vec<CritiqueResult>,
    /// Draft fed to architect and finalizer
    pub best_draft: BestDraft,
    /// Architect output (possibly degraded)
    pub blueprint: Blueprint,
    /// Final answer text
    pub final_output: String,
}

//! Canned council run for demos and UI development.
//!
//! Produces the same event shapes and ordering rules as a live run without
//! touching the provider: no credential, no network, no trace.

use super::context::RunPlan;
use super::events::EventEmitter;
use super::types::RunCouncilError;
use crate::config::{CouncilSettings, MockPacing};
use council_domain::{
    BestDraft, Blueprint, CouncilEvent, CouncilTranscript, CritiqueBatch, CritiqueResult,
    GenerationResult, TokenUsage, partition,
};
use rand::Rng;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::info;

const MOCK_REASONING: &str = "This agent provided the most balanced view in this mock scenario.";
const MOCK_FLAW: &str = "Mock criticism: Argument lacks specific examples.";
const MOCK_FINAL_TEXT: &str = "Here is the final consolidated mockery of the council's decision.\n\n# Verdict\nBased on the input...";

/// Serves a council run from canned data.
pub struct MockCouncilDriver {
    pacing: MockPacing,
}

impl MockCouncilDriver {
    pub fn new(settings: &CouncilSettings) -> Self {
        Self {
            pacing: settings.mock_pacing,
        }
    }

    pub async fn run(
        &self,
        plan: &RunPlan,
        events: &EventEmitter,
    ) -> Result<CouncilTranscript, RunCouncilError> {
        info!(agents = plan.agents.len(), "Mock mode: serving canned council run");

        let mut generations = Vec::with_capacity(plan.agents.len());
        for (persona, model) in plan.agents.iter().zip(&plan.generator_models) {
            events
                .emit(CouncilEvent::GeneratorStart {
                    agent: persona.name.clone(),
                    model: model.to_string(),
                })
                .await?;
            pause(self.pacing.generator_start).await;

            let text = format!(
                "This is a mock response from {}. Checking different perspectives...",
                persona.name
            );
            for chunk in word_pairs(&text) {
                events
                    .emit(CouncilEvent::GeneratorChunk {
                        agent: persona.name.clone(),
                        chunk,
                    })
                    .await?;
                pause(self.pacing.generator_chunk).await;
            }
            generations.push(GenerationResult::new(
                persona.name.clone(),
                text,
                TokenUsage::default(),
            ));
        }

        pause(self.pacing.stage).await;
        let first = generations.first().ok_or(RunCouncilError::NoActiveAgents)?;
        let mut best = BestDraft::from_result(first);
        let mut critiques = Vec::new();
        if generations.len() == 1 {
            critiques.push(CritiqueResult::auto_win(&first.agent));
        } else {
            for batch in partition(&generations) {
                if let Some(winner) = batch.members().first() {
                    best = BestDraft::from_result(winner);
                }
                critiques.push(mock_verdict(&batch));
            }
        }
        for verdict in &critiques {
            events
                .emit(CouncilEvent::CriticResult(verdict.clone()))
                .await?;
        }

        pause(self.pacing.stage).await;
        let blueprint = mock_blueprint();
        events
            .emit(CouncilEvent::ArchitectResult(blueprint.clone()))
            .await?;

        pause(self.pacing.stage).await;
        for word in MOCK_FINAL_TEXT.split_whitespace() {
            events
                .emit(CouncilEvent::FinalizerChunk {
                    chunk: format!("{} ", word),
                })
                .await?;
            pause(self.pacing.finalizer_chunk).await;
        }
        events.emit(CouncilEvent::Done).await?;

        Ok(CouncilTranscript {
            query: plan.query.content().to_string(),
            agents: plan.agent_names(),
            generations,
            critiques,
            best_draft: best,
            blueprint,
            final_output: MOCK_FINAL_TEXT.to_string(),
        })
    }
}

/// Split text into two-word chunks, each with a trailing space.
fn word_pairs(text: &str) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    words
        .chunks(2)
        .map(|pair| format!("{} ", pair.join(" ")))
        .collect()
}

/// First member wins; scores are random in 5..=10.
fn mock_verdict(batch: &CritiqueBatch<'_>) -> CritiqueResult {
    let ids = batch.ids();
    let mut rng = rand::rng();
    let scores: BTreeMap<String, u8> = ids
        .iter()
        .map(|id| (id.to_string(), rng.random_range(5..=10)))
        .collect();
    CritiqueResult {
        winner_id: ids.first().map(|id| id.to_string()).unwrap_or_default(),
        rankings: ids.iter().map(|id| id.to_string()).collect(),
        reasoning: MOCK_REASONING.to_string(),
        flaws: ids
            .iter()
            .map(|id| (id.to_string(), MOCK_FLAW.to_string()))
            .collect(),
        scores,
    }
}

fn mock_blueprint() -> Blueprint {
    Blueprint {
        structure: [
            "Introduction",
            "Analysis of Risks",
            "Strategic Benefits",
            "Conclusion",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect(),
        tone_guidelines: "Balanced but authoritative".to_string(),
        missing_facts_to_add: vec![
            "Recent regulatory changes".to_string(),
            "Economic impact stats".to_string(),
        ],
        critique_integration: "Lead with the winning draft and answer the critic's flaws."
            .to_string(),
    }
}

async fn pause(duration: Duration) {
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}

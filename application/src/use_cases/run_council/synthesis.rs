//! Stages 3 and 4: architect blueprint and final answer.

use super::RunCouncilUseCase;
use super::context::RunContext;
use super::critique::CritiqueOutcome;
use super::events::EventEmitter;
use super::types::RunCouncilError;
use crate::ports::llm_gateway::{CompletionRequest, OutputContract};
use council_domain::util::chunk_chars;
use council_domain::{BestDraft, Blueprint, CouncilEvent, Stage, parse_blueprint};
use std::time::Duration;
use tracing::{info, warn};

/// Architect output: the raw reply (forwarded to the finalizer) and the
/// parsed, possibly degraded, blueprint.
#[derive(Debug, Clone)]
pub(super) struct ArchitectOutcome {
    pub raw: String,
    pub blueprint: Blueprint,
}

impl RunCouncilUseCase {
    pub(super) async fn stage_architect(
        &self,
        ctx: &RunContext,
        critique: &CritiqueOutcome,
        events: &EventEmitter,
    ) -> Result<ArchitectOutcome, RunCouncilError> {
        info!(
            "{} (best draft: {})",
            Stage::Architect.display_name(),
            critique.best.agent
        );

        let prompt = self.settings.prompts.architect_prompt(
            ctx.query(),
            &critique.best.text,
            &critique.combined_payload(),
        );
        let request = CompletionRequest::new(
            ctx.plan.architect_model.clone(),
            prompt.clone(),
            ctx.credential.clone(),
        )
        .with_contract(OutputContract::Blueprint);

        let completion =
            self.gateway
                .complete(request)
                .await
                .map_err(|source| RunCouncilError::Stage {
                    stage: Stage::Architect,
                    source,
                })?;
        ctx.trace.log_step(
            Stage::Architect.trace_phase(),
            "Architect-Planner",
            &prompt,
            &completion.text,
        );

        let verdict = parse_blueprint(&completion.text);
        if let Some(reason) = verdict.fallback_reason() {
            warn!(reason = %reason, "Architect output unusable, using degraded blueprint");
        }
        let blueprint = verdict.into_value();
        events
            .emit(CouncilEvent::ArchitectResult(blueprint.clone()))
            .await?;

        Ok(ArchitectOutcome {
            raw: completion.text,
            blueprint,
        })
    }

    pub(super) async fn stage_finalizer(
        &self,
        ctx: &RunContext,
        best: &BestDraft,
        architect: &ArchitectOutcome,
        events: &EventEmitter,
    ) -> Result<String, RunCouncilError> {
        info!("{}", Stage::Finalizer.display_name());

        let prompt = self
            .settings
            .prompts
            .finalizer_prompt(ctx.query(), &architect.raw, &best.text);
        let request = CompletionRequest::new(
            ctx.plan.finalizer_model.clone(),
            prompt.clone(),
            ctx.credential.clone(),
        );

        let completion =
            self.gateway
                .complete(request)
                .await
                .map_err(|source| RunCouncilError::Stage {
                    stage: Stage::Finalizer,
                    source,
                })?;
        ctx.trace.log_step(
            Stage::Finalizer.trace_phase(),
            "Finalizer-Writer",
            &prompt,
            &completion.text,
        );

        emit_final_chunks(
            &completion.text,
            self.settings.finalizer_chunk_size,
            self.settings.finalizer_pacing,
            events,
        )
        .await?;

        Ok(completion.text)
    }
}

/// Emit `text` as `finalizer_chunk` events of at most `size` characters.
///
/// An empty answer still produces one (empty) chunk.
pub(super) async fn emit_final_chunks(
    text: &str,
    size: usize,
    pacing: Duration,
    events: &EventEmitter,
) -> Result<(), RunCouncilError> {
    let chunks = chunk_chars(text, size);
    if chunks.is_empty() {
        return events
            .emit(CouncilEvent::FinalizerChunk {
                chunk: String::new(),
            })
            .await;
    }

    for (i, chunk) in chunks.iter().enumerate() {
        if i > 0 && !pacing.is_zero() {
            tokio::time::sleep(pacing).await;
        }
        events
            .emit(CouncilEvent::FinalizerChunk {
                chunk: chunk.to_string(),
            })
            .await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn collect_chunks(text: &str, size: usize) -> Vec<String> {
        let (emitter, mut rx) = EventEmitter::channel(256);
        emit_final_chunks(text, size, Duration::ZERO, &emitter)
            .await
            .unwrap();
        drop(emitter);
        let mut chunks = Vec::new();
        while let Some(event) = rx.recv().await {
            if let CouncilEvent::FinalizerChunk { chunk } = event {
                chunks.push(chunk);
            }
        }
        chunks
    }

    #[tokio::test]
    async fn test_chunks_reassemble_to_original() {
        let text = "a".repeat(120);
        let chunks = collect_chunks(&text, 50).await;
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), 50);
        assert_eq!(chunks[2].len(), 20);
        assert_eq!(chunks.concat(), text);
    }

    #[tokio::test]
    async fn test_empty_answer_yields_one_empty_chunk() {
        let chunks = collect_chunks("", 50).await;
        assert_eq!(chunks, vec![String::new()]);
    }

    #[tokio::test]
    async fn test_multibyte_text_is_not_split_mid_char() {
        let text = "日本語のテキスト";
        let chunks = collect_chunks(text, 3).await;
        assert_eq!(chunks.concat(), text);
        assert!(chunks.iter().all(|c| c.chars().count() <= 3));
    }
}

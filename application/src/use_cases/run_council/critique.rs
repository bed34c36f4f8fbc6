//! Stage 2: batched critique.

use super::RunCouncilUseCase;
use super::context::RunContext;
use super::events::EventEmitter;
use super::types::RunCouncilError;
use crate::ports::llm_gateway::{CompletionRequest, OutputContract};
use council_domain::{
    BestDraft, CouncilEvent, CritiqueBatch, CritiqueResult, GenerationResult, Stage, Verdict,
    parse_critique, partition,
};
use tracing::{debug, info, warn};

/// What the critique stage hands to the architect.
#[derive(Debug, Clone)]
pub(super) struct CritiqueOutcome {
    /// Every emitted verdict, in batch order
    pub critiques: Vec<CritiqueResult>,
    /// Winner of the last batch
    pub best: BestDraft,
    /// False when the stage was skipped for a single agent
    pub judged: bool,
}

impl CritiqueOutcome {
    /// Serialized verdicts passed to the architect.
    ///
    /// A skipped stage forwards an empty list: the auto-win verdict carries
    /// no judgement.
    pub fn combined_payload(&self) -> String {
        if !self.judged {
            return "[]".to_string();
        }
        serde_json::to_string_pretty(&self.critiques).unwrap_or_else(|_| "[]".to_string())
    }
}

impl RunCouncilUseCase {
    pub(super) async fn stage_critique(
        &self,
        ctx: &RunContext,
        generations: &[GenerationResult],
        events: &EventEmitter,
    ) -> Result<CritiqueOutcome, RunCouncilError> {
        let phase = Stage::Critique.trace_phase();
        let first = generations.first().ok_or(RunCouncilError::NoActiveAgents)?;

        if generations.len() == 1 {
            info!("{} skipped: single agent wins automatically", Stage::Critique.display_name());
            let verdict = CritiqueResult::auto_win(&first.agent);
            ctx.trace.log_step(
                phase,
                "Auto-Critic",
                "Single Agent",
                &serde_json::to_string_pretty(&verdict).unwrap_or_default(),
            );
            events
                .emit(CouncilEvent::CriticResult(verdict.clone()))
                .await?;
            return Ok(CritiqueOutcome {
                critiques: vec![verdict],
                best: BestDraft::from_result(first),
                judged: false,
            });
        }

        let batches = partition(generations);
        info!(
            "{} ({} batches)",
            Stage::Critique.display_name(),
            batches.len()
        );
        let overview: String = batches.iter().map(|b| b.format_for_judge()).collect();
        ctx.trace
            .log_step(phase, "System", "Batching Responses", &overview);

        let mut critiques = Vec::with_capacity(batches.len());
        let mut best = BestDraft::from_result(first);

        for batch in &batches {
            let verdict = self.judge_batch(ctx, batch).await;

            let winner = match verdict.fallback_reason() {
                None => batch.resolve_winner(&verdict.value().winner_id),
                Some(reason) => {
                    warn!(
                        batch = batch.number(),
                        reason = %reason,
                        "Judge verdict unusable, first draft in batch wins"
                    );
                    batch.members().first()
                }
            };
            if let Some(winner) = winner {
                debug!(batch = batch.number(), winner = %winner.agent, "Batch judged");
                best = BestDraft::from_result(winner);
            }

            let verdict = verdict.into_value();
            events
                .emit(CouncilEvent::CriticResult(verdict.clone()))
                .await?;
            critiques.push(verdict);
        }

        Ok(CritiqueOutcome {
            critiques,
            best,
            judged: true,
        })
    }

    /// Run one judging call. Never fails: a provider error or unusable
    /// output becomes the fallback verdict.
    async fn judge_batch(
        &self,
        ctx: &RunContext,
        batch: &CritiqueBatch<'_>,
    ) -> Verdict<CritiqueResult> {
        let prompt = self
            .settings
            .prompts
            .critic_prompt(ctx.query(), &batch.format_for_judge());
        let request = CompletionRequest::new(
            ctx.plan.critic_model.clone(),
            prompt.clone(),
            ctx.credential.clone(),
        )
        .with_contract(OutputContract::Critique);
        let tag = format!("Critic-Batch-{}", batch.number());

        match self.gateway.complete(request).await {
            Ok(completion) => {
                ctx.trace.log_step(
                    Stage::Critique.trace_phase(),
                    &tag,
                    &prompt,
                    &completion.text,
                );
                parse_critique(&completion.text, batch)
            }
            Err(e) => {
                ctx.trace.log_step(
                    Stage::Critique.trace_phase(),
                    &tag,
                    &prompt,
                    &format!("ERROR: {}", e),
                );
                Verdict::Fallback {
                    value: CritiqueResult::fallback(&batch.ids()),
                    reason: e.to_string(),
                }
            }
        }
    }
}

//! Stage 1: parallel draft generation.

use super::RunCouncilUseCase;
use super::context::RunContext;
use super::events::EventEmitter;
use super::types::RunCouncilError;
use crate::ports::llm_gateway::{Completion, CompletionRequest};
use council_domain::{CouncilEvent, GenerationResult, Stage};
use futures::stream::{FuturesUnordered, StreamExt};
use tracing::{debug, info, warn};

impl RunCouncilUseCase {
    /// Ask every active persona for a draft, concurrently.
    ///
    /// All `generator_start` events go out before any call is polled. Each
    /// draft is emitted as one `generator_chunk` as soon as it and every
    /// earlier draft have arrived, so chunks follow selection order. The
    /// first failed call aborts the stage and drops the calls still in flight.
    pub(super) async fn stage_generation(
        &self,
        ctx: &RunContext,
        events: &EventEmitter,
    ) -> Result<Vec<GenerationResult>, RunCouncilError> {
        let agents = &ctx.plan.agents;
        info!("{} ({} agents)", Stage::Generation.display_name(), agents.len());

        let mut prompts = Vec::with_capacity(agents.len());
        let mut pending = FuturesUnordered::new();

        for (index, (persona, model)) in agents.iter().zip(&ctx.plan.generator_models).enumerate()
        {
            events
                .emit(CouncilEvent::GeneratorStart {
                    agent: persona.name.clone(),
                    model: model.to_string(),
                })
                .await?;

            let prompt = self.settings.prompts.generator_prompt(
                &persona.name,
                &persona.instruction,
                ctx.query(),
            );
            prompts.push(prompt.clone());

            let request = CompletionRequest::new(model.clone(), prompt, ctx.credential.clone());
            let gateway = &self.gateway;
            pending.push(async move { (index, gateway.complete(request).await) });
        }

        let mut arrived: Vec<Option<Completion>> = vec![None; agents.len()];
        let mut results = Vec::with_capacity(agents.len());

        while let Some((index, outcome)) = pending.next().await {
            let persona = &agents[index];
            let completion = outcome.map_err(|source| {
                warn!(agent = %persona.name, error = %source, "Generator failed");
                RunCouncilError::Generation {
                    agent: persona.name.clone(),
                    source,
                }
            })?;
            debug!(
                agent = %persona.name,
                tokens = completion.usage.total,
                "Generator finished"
            );
            arrived[index] = Some(completion);

            // Flush the contiguous prefix that is now complete
            while let Some(completion) = arrived.get_mut(results.len()).and_then(Option::take) {
                let position = results.len();
                let persona = &agents[position];
                ctx.trace.log_step(
                    Stage::Generation.trace_phase(),
                    &format!("Generator-{}", persona.name),
                    &prompts[position],
                    &completion.text,
                );
                events
                    .emit(CouncilEvent::GeneratorChunk {
                        agent: persona.name.clone(),
                        chunk: completion.text.clone(),
                    })
                    .await?;
                results.push(GenerationResult::new(
                    persona.name.clone(),
                    completion.text,
                    completion.usage,
                ));
            }
        }

        Ok(results)
    }
}

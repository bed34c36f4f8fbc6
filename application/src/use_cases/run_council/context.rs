//! Per-run state: who takes part and which model plays each role.

use super::types::{RunCouncilError, RunCouncilInput};
use crate::config::CouncilSettings;
use crate::ports::llm_gateway::ApiCredential;
use crate::ports::trace_sink::TraceGuard;
use council_domain::{ModelId, ModelRole, Persona, Query};
use tracing::{debug, warn};

/// Resolved participants and models for one run.
///
/// Shared by the live pipeline and the mock driver.
#[derive(Debug, Clone)]
pub struct RunPlan {
    pub query: Query,
    /// Active personas in selection order
    pub agents: Vec<Persona>,
    /// One model per active persona, same order as `agents`
    pub generator_models: Vec<ModelId>,
    pub critic_model: ModelId,
    pub architect_model: ModelId,
    pub finalizer_model: ModelId,
}

impl RunPlan {
    /// Filter the requested agents and resolve every role's model.
    pub fn prepare(
        input: &RunCouncilInput,
        settings: &CouncilSettings,
    ) -> Result<Self, RunCouncilError> {
        let selection = settings.personas.select(&input.agents);
        if !selection.unknown.is_empty() {
            warn!(unknown = ?selection.unknown, "Ignoring unknown agents");
        }
        if selection.active.is_empty() {
            return Err(RunCouncilError::NoActiveAgents);
        }

        let overrides = &input.models;
        let generator_models = selection
            .active
            .iter()
            .enumerate()
            .map(|(position, persona)| {
                settings
                    .models
                    .resolve_generator(position, &persona.name, overrides)
                    .ok_or_else(|| {
                        RunCouncilError::NoModelAssigned(ModelRole::generator_at(position).key())
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let resolve = |role: ModelRole| {
            settings
                .models
                .resolve(role, overrides)
                .ok_or_else(|| RunCouncilError::NoModelAssigned(role.key()))
        };

        let plan = Self {
            query: input.query.clone(),
            agents: selection.active,
            generator_models,
            critic_model: resolve(ModelRole::Critic)?,
            architect_model: resolve(ModelRole::Architect)?,
            finalizer_model: resolve(ModelRole::Finalizer)?,
        };
        debug!(
            agents = ?plan.agent_names(),
            critic = %plan.critic_model,
            architect = %plan.architect_model,
            finalizer = %plan.finalizer_model,
            "Run plan prepared"
        );
        Ok(plan)
    }

    pub fn agent_names(&self) -> Vec<String> {
        self.agents.iter().map(|p| p.name.clone()).collect()
    }
}

/// Everything a live run needs besides the gateway.
pub(super) struct RunContext {
    pub plan: RunPlan,
    pub credential: ApiCredential,
    pub trace: TraceGuard,
}

impl RunContext {
    pub fn new(plan: RunPlan, credential: ApiCredential, trace: TraceGuard) -> Self {
        Self {
            plan,
            credential,
            trace,
        }
    }

    pub fn query(&self) -> &str {
        self.plan.query.content()
    }
}

//! Run Council use case
//!
//! Orchestrates the four-stage council pipeline and reports progress as an
//! ordered stream of [`CouncilEvent`]s:
//!
//! 1. Generation - every active persona drafts in parallel
//! 2. Critique - drafts are judged in batches of three
//! 3. Architect - the best draft and critiques become a blueprint
//! 4. Finalizer - the blueprint and best draft become the answer
//!
//! A run that fails ends with exactly one `error` event. A run whose
//! consumer disconnects, or whose cancellation token fires, stops quietly.

mod context;
mod critique;
mod events;
mod generation;
mod mock;
mod synthesis;
mod types;

pub use context::RunPlan;
pub use events::{EVENT_BUFFER, EventEmitter};
pub use mock::MockCouncilDriver;
pub use types::{RunCouncilError, RunCouncilInput};

use crate::config::CouncilSettings;
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::trace_sink::{NoTrace, TraceFactory, TraceGuard};
use crate::use_cases::shared::run_cancellable;
use context::RunContext;
use council_domain::{CouncilEvent, CouncilTranscript, Stage};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Use case for running a council
pub struct RunCouncilUseCase {
    gateway: Arc<dyn LlmGateway>,
    settings: Arc<CouncilSettings>,
    trace: Arc<dyn TraceFactory>,
    cancellation_token: Option<CancellationToken>,
}

impl RunCouncilUseCase {
    pub fn new(gateway: Arc<dyn LlmGateway>, settings: CouncilSettings) -> Self {
        Self {
            gateway,
            settings: Arc::new(settings),
            trace: Arc::new(NoTrace),
            cancellation_token: None,
        }
    }

    /// Record each live run with traces opened from `factory`.
    pub fn with_trace(mut self, factory: Arc<dyn TraceFactory>) -> Self {
        self.trace = factory;
        self
    }

    /// Set a cancellation token for interrupting execution.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    pub fn settings(&self) -> &CouncilSettings {
        &self.settings
    }

    /// Start a run in the background and return its event stream.
    pub fn stream(self: Arc<Self>, input: RunCouncilInput) -> mpsc::Receiver<CouncilEvent> {
        let (emitter, rx) = EventEmitter::channel(EVENT_BUFFER);
        tokio::spawn(async move {
            let _ = self.execute(input, &emitter).await;
        });
        rx
    }

    /// Execute a run, emitting its events on `events`.
    ///
    /// Any failure other than cancellation is also reported as a single
    /// `error` event before returning.
    pub async fn execute(
        &self,
        input: RunCouncilInput,
        events: &EventEmitter,
    ) -> Result<CouncilTranscript, RunCouncilError> {
        let outcome = run_cancellable(&self.cancellation_token, self.run(input, events)).await;

        match &outcome {
            Ok(_) => info!("Council run complete"),
            Err(e) if e.is_cancelled() => info!("Council run cancelled"),
            Err(e) => {
                error!(error = %e, stage = ?e.stage(), "Council run failed");
                let _ = events.emit(CouncilEvent::error(e.to_string())).await;
            }
        }
        outcome
    }

    async fn run(
        &self,
        input: RunCouncilInput,
        events: &EventEmitter,
    ) -> Result<CouncilTranscript, RunCouncilError> {
        let plan = RunPlan::prepare(&input, &self.settings)?;

        if self.settings.mock_mode {
            return MockCouncilDriver::new(&self.settings)
                .run(&plan, events)
                .await;
        }

        let credential = input
            .credential
            .or_else(|| self.settings.default_credential.clone())
            .ok_or(RunCouncilError::MissingCredential)?;

        let ctx = RunContext::new(plan, credential, TraceGuard::new(self.trace.open()));
        let agent_names = ctx.plan.agent_names();
        info!("Starting council with {} agents", agent_names.len());
        ctx.trace.log_step(
            "Initialization",
            "System",
            ctx.query(),
            &format!("Workflow started. Agents: {}", agent_names.join(", ")),
        );

        let generations = self.stage_generation(&ctx, events).await?;
        let critique = self.stage_critique(&ctx, &generations, events).await?;
        let architect = self.stage_architect(&ctx, &critique, events).await?;
        let final_output = self
            .stage_finalizer(&ctx, &critique.best, &architect, events)
            .await?;

        ctx.trace.log_step(
            Stage::Finalizer.trace_phase(),
            "System",
            "Workflow complete",
            &format!("{} characters delivered", final_output.chars().count()),
        );
        events.emit(CouncilEvent::Done).await?;

        Ok(CouncilTranscript {
            query: ctx.query().to_string(),
            agents: agent_names,
            generations,
            critiques: critique.critiques,
            best_draft: critique.best,
            blueprint: architect.blueprint,
            final_output,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MockPacing;
    use crate::ports::llm_gateway::{
        ApiCredential, Completion, CompletionRequest, GatewayError, OutputContract,
    };
    use crate::ports::trace_sink::TraceSink;
    use async_trait::async_trait;
    use council_domain::{
        FALLBACK_WINNER_ID, ModelId, ModelOverrides, Query, TokenUsage, batch_count,
    };
    use std::path::PathBuf;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Gateway that answers by request kind and records every request.
    #[derive(Default)]
    struct ScriptedGateway {
        /// Draft failures keyed by a persona name found in the prompt
        failing_generator: Option<String>,
        /// Judge replies, consumed in order; `None` means provider error
        judge_replies: Mutex<Vec<Option<String>>>,
        architect_reply: Option<String>,
        final_reply: String,
        fail_finalizer: bool,
        /// Persona whose draft is delayed, to scramble completion order
        slow_generator: Option<String>,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl ScriptedGateway {
        fn new() -> Self {
            Self {
                final_reply: "The council has spoken.".to_string(),
                ..Default::default()
            }
        }

        fn with_judges<S: AsRef<str>>(self, replies: Vec<Option<S>>) -> Self {
            *self.judge_replies.lock().unwrap() = replies
                .into_iter()
                .map(|r| r.map(|text| text.as_ref().to_string()))
                .collect();
            self
        }

        fn requests_with(&self, contract: Option<OutputContract>) -> Vec<CompletionRequest> {
            self.requests
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.contract == contract)
                .cloned()
                .collect()
        }
    }

    fn judge_reply(winner: &str) -> String {
        format!(
            "```json\n{{\"winner_id\": \"{winner}\", \"rankings\": [\"{winner}\"], \
             \"reasoning\": \"clearest\", \"flaws\": {{}}, \"scores\": {{\"{winner}\": 9}}}}\n```"
        )
    }

    /// Text that only the finalizer prompt contains
    const FINALIZER_MARKER: &str = "Follow this blueprint exactly";

    const BLUEPRINT_REPLY: &str = r#"{"structure": ["Intro", "Body"], "tone_guidelines": "plain",
        "missing_facts_to_add": [], "critique_integration": "merge"}"#;

    #[async_trait]
    impl LlmGateway for ScriptedGateway {
        async fn complete(&self, request: CompletionRequest) -> Result<Completion, GatewayError> {
            self.requests.lock().unwrap().push(request.clone());
            match request.contract {
                Some(OutputContract::Critique) => {
                    let mut replies = self.judge_replies.lock().unwrap();
                    let reply = if replies.is_empty() {
                        None
                    } else {
                        replies.remove(0)
                    };
                    reply.map(|text| Completion::new(text, TokenUsage::new(10, 20))).ok_or(
                        GatewayError::Provider {
                            status: 502,
                            message: "judge unavailable".to_string(),
                        },
                    )
                }
                Some(OutputContract::Blueprint) => Ok(Completion::new(
                    self.architect_reply
                        .clone()
                        .unwrap_or_else(|| BLUEPRINT_REPLY.to_string()),
                    TokenUsage::default(),
                )),
                None if request.prompt.contains(FINALIZER_MARKER) => {
                    if self.fail_finalizer {
                        return Err(GatewayError::Timeout);
                    }
                    Ok(Completion::new(self.final_reply.clone(), TokenUsage::default()))
                }
                None => {
                    if let Some(name) = &self.failing_generator
                        && request.prompt.contains(name.as_str())
                    {
                        return Err(GatewayError::Provider {
                            status: 401,
                            message: "No auth credentials found".to_string(),
                        });
                    }
                    if let Some(name) = &self.slow_generator
                        && request.prompt.contains(name.as_str())
                    {
                        tokio::time::sleep(Duration::from_millis(50)).await;
                    }
                    Ok(Completion::new(
                        format!("draft: {}", request.prompt.len()),
                        TokenUsage::new(5, 7),
                    ))
                }
            }
        }

        async fn check_credentials(&self, _: &ApiCredential) -> Result<(), GatewayError> {
            Ok(())
        }

        async fn check_model(&self, _: &ModelId, _: &ApiCredential) -> Result<(), GatewayError> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingTrace {
        steps: Mutex<Vec<(String, String)>>,
        finalized: Mutex<bool>,
    }

    impl TraceSink for RecordingTrace {
        fn log_step(&self, phase: &str, agent_tag: &str, _input: &str, _output: &str) {
            self.steps
                .lock()
                .unwrap()
                .push((phase.to_string(), agent_tag.to_string()));
        }

        fn finalize(&self) -> Option<PathBuf> {
            *self.finalized.lock().unwrap() = true;
            None
        }
    }

    struct SharedTrace(Arc<RecordingTrace>);

    impl TraceFactory for SharedTrace {
        fn open(&self) -> Arc<dyn TraceSink> {
            self.0.clone()
        }
    }

    fn settings() -> CouncilSettings {
        CouncilSettings::default()
            .with_default_credential(ApiCredential::new("sk-test"))
            .with_finalizer_pacing(Duration::ZERO)
            .with_mock_pacing(MockPacing::none())
    }

    fn input(agents: &[&str]) -> RunCouncilInput {
        RunCouncilInput::new(
            Query::try_new("Should cities ban cars?").unwrap(),
            agents.iter().map(|a| a.to_string()).collect(),
        )
    }

    const ALL_FIVE: [&str; 5] = [
        "The Academic",
        "The Layman",
        "The Skeptic",
        "The Futurist",
        "The Ethical Guardian",
    ];

    async fn run(
        gateway: ScriptedGateway,
        settings: CouncilSettings,
        input: RunCouncilInput,
    ) -> (
        Result<CouncilTranscript, RunCouncilError>,
        Vec<CouncilEvent>,
        Arc<ScriptedGateway>,
    ) {
        let gateway = Arc::new(gateway);
        let use_case = RunCouncilUseCase::new(gateway.clone(), settings);
        let (emitter, mut rx) = EventEmitter::channel(1024);
        let result = use_case.execute(input, &emitter).await;
        drop(emitter);
        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }
        (result, events, gateway)
    }

    fn names(events: &[CouncilEvent]) -> Vec<&'static str> {
        events.iter().map(|e| e.name()).collect()
    }

    fn critic_results(events: &[CouncilEvent]) -> Vec<&council_domain::CritiqueResult> {
        events
            .iter()
            .filter_map(|e| match e {
                CouncilEvent::CriticResult(v) => Some(v),
                _ => None,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_single_agent_auto_wins() {
        let (result, events, gateway) =
            run(ScriptedGateway::new(), settings(), input(&["The Academic"])).await;
        let transcript = result.unwrap();

        assert_eq!(
            names(&events),
            vec![
                "generator_start",
                "generator_chunk",
                "critic_result",
                "architect_result",
                "finalizer_chunk",
                "done"
            ]
        );
        let verdicts = critic_results(&events);
        assert_eq!(verdicts[0].winner_id, "The Academic");
        assert_eq!(verdicts[0].scores["The Academic"], 10);
        assert_eq!(transcript.best_draft.agent, "The Academic");

        // No judging call was made; the architect saw an empty critique list
        assert!(gateway.requests_with(Some(OutputContract::Critique)).is_empty());
        let architect = gateway.requests_with(Some(OutputContract::Blueprint));
        assert!(architect[0].prompt.contains("[]"));
    }

    #[tokio::test]
    async fn test_three_agents_one_batch() {
        let gateway = ScriptedGateway::new().with_judges(vec![Some(&judge_reply("The Skeptic"))]);
        let (result, events, _) = run(
            gateway,
            settings(),
            input(&["The Academic", "The Layman", "The Skeptic"]),
        )
        .await;
        let transcript = result.unwrap();
        assert_eq!(critic_results(&events).len(), 1);
        assert_eq!(transcript.best_draft.agent, "The Skeptic");
        assert_eq!(events.last(), Some(&CouncilEvent::Done));
    }

    #[tokio::test]
    async fn test_five_agents_last_batch_winner_is_best() {
        let gateway = ScriptedGateway::new().with_judges(vec![
            Some(&judge_reply("The Layman")),
            Some(&judge_reply("The Ethical Guardian")),
        ]);
        let (result, events, gateway) = run(gateway, settings(), input(&ALL_FIVE)).await;
        let transcript = result.unwrap();

        assert_eq!(critic_results(&events).len(), batch_count(5));
        assert_eq!(transcript.critiques.len(), 2);
        assert_eq!(transcript.best_draft.agent, "The Ethical Guardian");

        let judged = gateway.requests_with(Some(OutputContract::Critique));
        assert!(judged[0].prompt.contains("--- RESPONSE ID: The Skeptic ---"));
        assert!(!judged[0].prompt.contains("--- RESPONSE ID: The Futurist ---"));
        assert!(judged[1].prompt.contains("--- RESPONSE ID: The Futurist ---"));
    }

    #[tokio::test]
    async fn test_unusable_judge_output_falls_back_to_first_in_batch() {
        let gateway = ScriptedGateway::new().with_judges(vec![Some(
            r#"{"rankings": ["The Layman"], "reasoning": "x", "flaws": {}, "scores": {}}"#,
        )]);
        let (result, events, _) =
            run(gateway, settings(), input(&["The Layman", "The Skeptic"])).await;
        let transcript = result.unwrap();
        let verdicts = critic_results(&events);
        assert_eq!(verdicts.len(), 1);
        assert_eq!(verdicts[0].winner_id, FALLBACK_WINNER_ID);
        assert_eq!(verdicts[0].rankings, vec!["The Layman", "The Skeptic"]);
        assert_eq!(transcript.best_draft.agent, "The Layman");
        assert_eq!(events.last(), Some(&CouncilEvent::Done));
    }

    #[tokio::test]
    async fn test_judge_provider_error_does_not_abort() {
        let gateway = ScriptedGateway::new().with_judges(vec![None::<&str>]);
        let (result, events, _) =
            run(gateway, settings(), input(&["The Skeptic", "The Futurist"])).await;
        assert!(result.is_ok());
        assert!(critic_results(&events)[0].is_fallback());
        assert!(!names(&events).contains(&"error"));
    }

    #[tokio::test]
    async fn test_winner_resolved_by_substring() {
        let gateway =
            ScriptedGateway::new().with_judges(vec![Some(&judge_reply("Winner: The Futurist!"))]);
        let (result, _, _) =
            run(gateway, settings(), input(&["The Skeptic", "The Futurist"])).await;
        assert_eq!(result.unwrap().best_draft.agent, "The Futurist");
    }

    #[tokio::test]
    async fn test_empty_selection_emits_single_error() {
        let (result, events, gateway) = run(ScriptedGateway::new(), settings(), input(&[])).await;
        assert!(matches!(result, Err(RunCouncilError::NoActiveAgents)));
        assert_eq!(events, vec![CouncilEvent::error("No valid agents selected.")]);
        assert!(gateway.requests.lock().unwrap().is_empty());

        let (_, events, _) = run(ScriptedGateway::new(), settings(), input(&["Nobody"])).await;
        assert_eq!(names(&events), vec!["error"]);
    }

    #[tokio::test]
    async fn test_missing_credential_emits_single_error() {
        let settings = settings().with_default_credential(None);
        let (result, events, gateway) =
            run(ScriptedGateway::new(), settings, input(&["The Academic"])).await;
        assert!(matches!(result, Err(RunCouncilError::MissingCredential)));
        assert_eq!(names(&events), vec!["error"]);
        assert!(gateway.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_request_credential_wins_over_default() {
        let (_, _, gateway) = run(
            ScriptedGateway::new(),
            settings(),
            input(&["The Academic"]).with_credential(ApiCredential::new("sk-per-run")),
        )
        .await;
        let requests = gateway.requests.lock().unwrap();
        assert!(requests.iter().all(|r| r.credential.expose() == "sk-per-run"));
    }

    #[tokio::test]
    async fn test_generator_failure_aborts_run() {
        let gateway = ScriptedGateway {
            failing_generator: Some("The Layman".to_string()),
            ..ScriptedGateway::new()
        };
        let (result, events, gateway) = run(
            gateway,
            settings(),
            input(&["The Academic", "The Layman", "The Skeptic"]),
        )
        .await;
        assert!(matches!(
            result,
            Err(RunCouncilError::Generation { ref agent, .. }) if agent == "The Layman"
        ));
        let last = events.last().unwrap();
        assert_eq!(last.name(), "error");
        assert!(last.payload()["message"]
            .as_str()
            .unwrap()
            .contains("No auth credentials found"));
        assert_eq!(names(&events).iter().filter(|n| **n == "error").count(), 1);
        assert!(!names(&events).contains(&"critic_result"));
        assert!(gateway.requests_with(Some(OutputContract::Critique)).is_empty());
    }

    #[tokio::test]
    async fn test_degraded_blueprint_still_finishes() {
        let gateway = ScriptedGateway {
            architect_reply: Some("I would structure it nicely.".to_string()),
            ..ScriptedGateway::new()
        };
        let (result, events, gateway) = run(gateway, settings(), input(&["The Academic"])).await;
        let transcript = result.unwrap();
        assert!(transcript.blueprint.is_degraded());
        assert_eq!(events.last(), Some(&CouncilEvent::Done));

        // The finalizer receives the raw architect text
        let finalizer = gateway
            .requests
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.prompt.contains(FINALIZER_MARKER))
            .cloned()
            .unwrap();
        assert!(finalizer.prompt.contains("I would structure it nicely."));
    }

    #[tokio::test]
    async fn test_finalizer_failure_aborts_after_blueprint() {
        let gateway = ScriptedGateway {
            fail_finalizer: true,
            ..ScriptedGateway::new()
        };
        let (result, events, _) = run(gateway, settings(), input(&["The Academic"])).await;
        assert!(matches!(
            result,
            Err(RunCouncilError::Stage {
                stage: Stage::Finalizer,
                ..
            })
        ));
        let names = names(&events);
        assert!(names.contains(&"architect_result"));
        assert_eq!(names.last(), Some(&"error"));
        assert!(!names.contains(&"done"));
    }

    #[tokio::test]
    async fn test_event_ordering_and_dispatch_order() {
        let gateway = ScriptedGateway {
            slow_generator: Some("The Academic".to_string()),
            ..ScriptedGateway::new()
        }
        .with_judges(vec![Some(&judge_reply("The Layman"))]);
        let (result, events, _) = run(
            gateway,
            settings(),
            input(&["The Academic", "The Layman", "The Skeptic"]),
        )
        .await;
        result.unwrap();

        // All starts precede all chunks
        let names = names(&events);
        assert_eq!(&names[..3], &["generator_start"; 3]);
        assert_eq!(&names[3..6], &["generator_chunk"; 3]);

        // Chunks follow selection order even though the first draft finished last
        let chunk_agents: Vec<&str> = events
            .iter()
            .filter_map(|e| match e {
                CouncilEvent::GeneratorChunk { agent, .. } => Some(agent.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(chunk_agents, vec!["The Academic", "The Layman", "The Skeptic"]);

        let first_critic = names.iter().position(|n| *n == "critic_result").unwrap();
        let architect = names.iter().position(|n| *n == "architect_result").unwrap();
        let first_final = names.iter().position(|n| *n == "finalizer_chunk").unwrap();
        assert!(first_critic > 5 && architect > first_critic && first_final > architect);
        assert_eq!(names.last(), Some(&"done"));
    }

    #[tokio::test]
    async fn test_final_output_is_chunked() {
        let gateway = ScriptedGateway {
            final_reply: "x".repeat(120),
            ..ScriptedGateway::new()
        };
        let (result, events, _) = run(gateway, settings(), input(&["The Academic"])).await;
        let chunks: Vec<String> = events
            .iter()
            .filter_map(|e| match e {
                CouncilEvent::FinalizerChunk { chunk } => Some(chunk.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks.concat(), result.unwrap().final_output);
    }

    #[tokio::test]
    async fn test_model_overrides_reach_gateway() {
        let model = ModelId::new("openai/gpt-4o-mini").unwrap();
        let overrides = ModelOverrides::new()
            .with("The Layman", model.clone())
            .with("finalizer", model.clone());
        let (_, events, gateway) = run(
            ScriptedGateway::new().with_judges(vec![Some(&judge_reply("The Layman"))]),
            settings(),
            input(&["The Academic", "The Layman"]).with_models(overrides),
        )
        .await;
        assert!(events.contains(&CouncilEvent::GeneratorStart {
            agent: "The Layman".to_string(),
            model: "openai/gpt-4o-mini".to_string(),
        }));
        let requests = gateway.requests.lock().unwrap();
        let finalizer = requests
            .iter()
            .find(|r| r.prompt.contains(FINALIZER_MARKER))
            .unwrap();
        assert_eq!(finalizer.model, model);
    }

    #[tokio::test]
    async fn test_trace_records_steps_and_finalizes() {
        let trace = Arc::new(RecordingTrace::default());
        let gateway = Arc::new(
            ScriptedGateway::new().with_judges(vec![
                Some(&judge_reply("The Academic")),
                Some(&judge_reply("The Futurist")),
            ]),
        );
        let use_case = RunCouncilUseCase::new(gateway, settings())
            .with_trace(Arc::new(SharedTrace(trace.clone())));
        let (emitter, _rx) = EventEmitter::channel(1024);
        use_case.execute(input(&ALL_FIVE), &emitter).await.unwrap();

        let steps = trace.steps.lock().unwrap();
        let tags: Vec<&str> = steps.iter().map(|(_, tag)| tag.as_str()).collect();
        assert_eq!(tags[0], "System");
        assert!(tags.contains(&"Generator-The Skeptic"));
        assert!(tags.contains(&"Critic-Batch-1"));
        assert!(tags.contains(&"Critic-Batch-2"));
        assert!(tags.contains(&"Architect-Planner"));
        assert!(tags.contains(&"Finalizer-Writer"));
        assert!(*trace.finalized.lock().unwrap());
    }

    #[tokio::test]
    async fn test_dropped_receiver_cancels_quietly() {
        let gateway = Arc::new(ScriptedGateway::new());
        let use_case = RunCouncilUseCase::new(gateway.clone(), settings());
        let (emitter, rx) = EventEmitter::channel(1);
        drop(rx);
        let result = use_case.execute(input(&ALL_FIVE), &emitter).await;
        assert!(matches!(result, Err(RunCouncilError::Cancelled)));
        assert!(gateway.requests_with(Some(OutputContract::Critique)).is_empty());
    }

    #[tokio::test]
    async fn test_cancellation_token_stops_run() {
        let token = CancellationToken::new();
        token.cancel();
        let use_case = RunCouncilUseCase::new(Arc::new(ScriptedGateway::new()), settings())
            .with_cancellation(token);
        let (emitter, mut rx) = EventEmitter::channel(16);
        let result = use_case.execute(input(&["The Academic"]), &emitter).await;
        assert!(matches!(result, Err(RunCouncilError::Cancelled)));
        drop(emitter);
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn test_stream_delivers_full_run() {
        let use_case = Arc::new(RunCouncilUseCase::new(
            Arc::new(ScriptedGateway::new()),
            settings(),
        ));
        let mut rx = use_case.stream(input(&["The Futurist"]));
        let mut last = None;
        while let Some(event) = rx.recv().await {
            last = Some(event);
        }
        assert_eq!(last, Some(CouncilEvent::Done));
    }

    #[tokio::test]
    async fn test_mock_mode_shape_and_repeatability() {
        let settings = settings().with_mock_mode(true).with_default_credential(None);
        let (first, first_events, gateway) =
            run(ScriptedGateway::new(), settings.clone(), input(&ALL_FIVE)).await;
        let (_, second_events, _) = run(ScriptedGateway::new(), settings, input(&ALL_FIVE)).await;

        assert!(first.is_ok());
        assert!(gateway.requests.lock().unwrap().is_empty());
        assert_eq!(names(&first_events), names(&second_events));
        assert_eq!(critic_results(&first_events).len(), batch_count(5));
        assert_eq!(names(&first_events).last(), Some(&"done"));
        assert_eq!(
            first_events
                .iter()
                .filter(|e| e.name() == "generator_start")
                .count(),
            5
        );
    }

    #[tokio::test]
    async fn test_mock_mode_single_agent_and_empty() {
        let settings = settings().with_mock_mode(true);
        let (_, events, _) =
            run(ScriptedGateway::new(), settings.clone(), input(&["The Skeptic"])).await;
        let verdicts = critic_results(&events);
        assert_eq!(verdicts.len(), 1);
        assert_eq!(verdicts[0].scores["The Skeptic"], 10);

        let (_, events, _) = run(ScriptedGateway::new(), settings, input(&[])).await;
        assert_eq!(names(&events), vec!["error"]);
    }
}

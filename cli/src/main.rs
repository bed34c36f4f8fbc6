//! CLI entrypoint for llm-council
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use council_application::{
    ApiCredential, LlmGateway, RunCouncilInput, RunCouncilUseCase, TraceFactory,
};
use council_domain::{ConfigIssue, ModelId, OutputFormat, Query, Severity};
use council_infrastructure::{
    ConfigLoader, FileConfig, MarkdownTraceFactory, OpenRouterGateway, PromptLoader,
};
use council_presentation::{
    Cli, RunOutcome, StageProgress, defaults_json, format_agent_list, renderer_for,
};
use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level; stdout carries the event stream
    let filter = match (cli.quiet, cli.verbose) {
        (true, _) => EnvFilter::new("error"),
        (_, 0) => EnvFilter::new("warn"),
        (_, 1) => EnvFilter::new("info"),
        (_, 2) => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        for line in ConfigLoader::describe_sources(cli.config.as_deref()) {
            println!("{}", line);
        }
        return Ok(ExitCode::SUCCESS);
    }

    // === Configuration ===
    let file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
    }
    .map_err(|e| anyhow!("Failed to load configuration: {}", e))?;

    report_issues(&file_config.validate())?;

    if !file_config.output.color {
        colored::control::set_override(false);
    }

    let mut settings = file_config.to_settings();
    if let Some(dir) = &file_config.council.prompts_dir {
        let prompts = PromptLoader::new(dir)
            .load()
            .context("Failed to load prompt templates")?;
        settings = settings.with_prompts(prompts);
    }
    if let Some(mock) = cli.mock_override() {
        settings = settings.with_mock_mode(mock);
    }

    if cli.list_agents {
        print!("{}", format_agent_list(&settings.personas));
        return Ok(ExitCode::SUCCESS);
    }
    if cli.show_defaults {
        let defaults = defaults_json(&settings.personas, &settings.models);
        println!("{}", serde_json::to_string_pretty(&defaults)?);
        return Ok(ExitCode::SUCCESS);
    }

    // === Dependency Injection ===
    let gateway = Arc::new(OpenRouterGateway::new(
        file_config.provider.to_openrouter_config(),
    )?);
    let credential = cli.api_key.as_deref().and_then(ApiCredential::new);

    if cli.check_credentials || cli.check_model.is_some() {
        let credential = credential
            .or_else(|| settings.default_credential.clone())
            .ok_or_else(|| anyhow!("No API key: set OPENROUTER_API_KEY or pass --api-key"))?;
        return check_provider(gateway.as_ref(), &cli, &credential).await;
    }

    let query = Query::try_new(cli.query.clone().unwrap_or_default())
        .context("A query is required (see --help)")?;
    let agents = if cli.agents.is_empty() {
        settings.personas.default_selection()
    } else {
        cli.agents.clone()
    };
    let overrides = cli.model_overrides().map_err(|e| anyhow!(e))?;
    let format = cli
        .output
        .map(OutputFormat::from)
        .or(file_config.output.format)
        .unwrap_or_default();
    let show_progress = !cli.quiet && file_config.output.progress && format != OutputFormat::Console;
    let agent_count = settings.personas.select(&agents).active.len();

    let token = CancellationToken::new();
    let ctrl_c = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    let mut use_case =
        RunCouncilUseCase::new(gateway, settings).with_cancellation(token.clone());
    if let Some(trace) = trace_factory(&file_config) {
        use_case = use_case.with_trace(trace);
    }
    let use_case = Arc::new(use_case);

    info!("Starting llm-council");
    let input = RunCouncilInput::new(query, agents)
        .with_credential(credential)
        .with_models(overrides);
    let mut events = use_case.stream(input);

    let mut renderer = renderer_for(format);
    let mut progress = show_progress.then(|| StageProgress::new(agent_count));
    let mut outcome = RunOutcome::default();
    let mut stdout = std::io::stdout();

    while let Some(event) = events.recv().await {
        if let Some(progress) = progress.as_mut() {
            progress.observe(&event);
        }
        if let Some(text) = renderer.render(&event) {
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
        outcome.observe(&event);
        if event.is_terminal() {
            break;
        }
    }

    match &outcome {
        RunOutcome::Unfinished if token.is_cancelled() => eprintln!("Cancelled."),
        RunOutcome::Unfinished => eprintln!("Run ended without a result."),
        RunOutcome::Failed(message) if format == OutputFormat::Final => {
            eprintln!("Error: {}", message)
        }
        _ => {}
    }
    Ok(ExitCode::from(outcome.exit_status(token.is_cancelled())))
}

/// Log warnings; fail on errors.
fn report_issues(issues: &[ConfigIssue]) -> Result<()> {
    for issue in issues {
        match issue.severity {
            Severity::Warning => warn!("{}", issue.message),
            Severity::Error => eprintln!("Config error: {}", issue.message),
        }
    }
    if ConfigIssue::has_errors(issues) {
        bail!("Invalid configuration");
    }
    Ok(())
}

fn trace_factory(config: &FileConfig) -> Option<Arc<dyn TraceFactory>> {
    if !config.council.trace {
        return None;
    }
    Some(Arc::new(MarkdownTraceFactory::new(&config.council.trace_dir)))
}

async fn check_provider(
    gateway: &dyn LlmGateway,
    cli: &Cli,
    credential: &ApiCredential,
) -> Result<ExitCode> {
    if cli.check_credentials {
        gateway
            .check_credentials(credential)
            .await
            .context("Credential check failed")?;
        println!("Credentials OK");
    }
    if let Some(model) = &cli.check_model {
        let model = ModelId::new(model.as_str())?;
        gateway
            .check_model(&model, credential)
            .await
            .with_context(|| format!("Model check failed for {}", model))?;
        println!("Model {} OK", model);
    }
    Ok(ExitCode::SUCCESS)
}

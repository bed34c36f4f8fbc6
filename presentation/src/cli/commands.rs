//! CLI command definitions

use clap::{Parser, ValueEnum};
use council_domain::{ModelId, ModelOverrides, OutputFormat};
use std::path::PathBuf;

/// Output format for the event stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    /// Human-readable rendering of every stage
    Console,
    /// Server-Sent Events frames
    Sse,
    /// One JSON object per event
    Jsonl,
    /// Only the final answer
    Final,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Console => OutputFormat::Console,
            OutputFormatArg::Sse => OutputFormat::Sse,
            OutputFormatArg::Jsonl => OutputFormat::Jsonl,
            OutputFormatArg::Final => OutputFormat::Final,
        }
    }
}

/// CLI arguments for llm-council
#[derive(Parser, Debug)]
#[command(name = "llm-council")]
#[command(author, version, about = "LLM Council - personas draft, critique, plan and write one answer")]
#[command(long_about = r#"
LLM Council puts one question before a panel of personas and refines their answers.

The process has four stages:
1. Generators: every selected persona drafts an answer in parallel
2. Critics: drafts are judged in batches of three; each batch names a winner
3. Architect: the best draft and the critiques become a structural blueprint
4. Finalizer: the blueprint and the best draft become the final answer

Configuration files are loaded from (in priority order):
1. COUNCIL_* / OPENROUTER_* environment variables
2. --config <path>     Explicit config file
3. ./council.toml      Project-level config
4. ~/.config/llm-council/config.toml   Global config

Example:
  llm-council "Should cities ban cars from downtown?"
  llm-council -a "The Skeptic" -a "The Futurist" --live "Is fusion power close?"
  llm-council --model critic=openai/gpt-4o -o jsonl "Explain inflation"
"#)]
pub struct Cli {
    /// The question to put before the council
    pub query: Option<String>,

    /// Persona to include (can be specified multiple times; defaults to the first three)
    #[arg(short, long = "agent", value_name = "NAME")]
    pub agents: Vec<String>,

    /// Model override as ROLE=MODEL or PERSONA=MODEL (can be specified multiple times)
    #[arg(short, long = "model", value_name = "KEY=MODEL")]
    pub models: Vec<String>,

    /// OpenRouter API key for this run
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Serve the run from canned data
    #[arg(long, conflicts_with = "live")]
    pub mock: bool,

    /// Call the provider even if mock mode is configured
    #[arg(long)]
    pub live: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormatArg>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// List the available personas and exit
    #[arg(long)]
    pub list_agents: bool,

    /// Print personas and default models as JSON and exit
    #[arg(long)]
    pub show_defaults: bool,

    /// Verify the API key against the provider and exit
    #[arg(long)]
    pub check_credentials: bool,

    /// Verify that a model id is callable and exit
    #[arg(long, value_name = "MODEL")]
    pub check_model: Option<String>,
}

impl Cli {
    /// Mock mode as requested on the command line, if at all.
    pub fn mock_override(&self) -> Option<bool> {
        match (self.mock, self.live) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }

    /// Parse the `--model` flags.
    pub fn model_overrides(&self) -> Result<ModelOverrides, String> {
        parse_model_overrides(&self.models)
    }
}

/// Parse `KEY=MODEL` pairs. Keys are role keys (`critic`, `generator_2`)
/// or persona names.
pub fn parse_model_overrides(pairs: &[String]) -> Result<ModelOverrides, String> {
    let mut overrides = ModelOverrides::new();
    for pair in pairs {
        let (key, model) = pair
            .split_once('=')
            .ok_or_else(|| format!("Invalid model override '{}': expected KEY=MODEL", pair))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(format!("Invalid model override '{}': empty key", pair));
        }
        let model = ModelId::new(model.trim())
            .map_err(|e| format!("Invalid model override '{}': {}", pair, e))?;
        overrides.insert(key, model);
    }
    Ok(overrides)
}

//! Progress reporting for council runs

use colored::Colorize;
use council_domain::{CouncilEvent, Stage, batch_count};
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Per-stage progress bars driven by the event stream.
///
/// Bars are drawn on stderr so they never mix with the rendered output.
pub struct StageProgress {
    multi: MultiProgress,
    agent_count: usize,
    stage: Option<Stage>,
    bar: Option<ProgressBar>,
    last_agent: Option<String>,
}

impl StageProgress {
    pub fn new(agent_count: usize) -> Self {
        Self::with_target(agent_count, ProgressDrawTarget::stderr())
    }

    /// Progress that tracks state without drawing.
    pub fn hidden(agent_count: usize) -> Self {
        Self::with_target(agent_count, ProgressDrawTarget::hidden())
    }

    fn with_target(agent_count: usize, target: ProgressDrawTarget) -> Self {
        Self {
            multi: MultiProgress::with_draw_target(target),
            agent_count,
            stage: None,
            bar: None,
            last_agent: None,
        }
    }

    fn stage_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    /// Number of steps a stage reports.
    fn stage_len(&self, stage: Stage) -> u64 {
        let steps = match stage {
            Stage::Generation => self.agent_count,
            Stage::Critique if self.agent_count <= 1 => 1,
            Stage::Critique => batch_count(self.agent_count),
            Stage::Architect | Stage::Finalizer => 1,
        };
        steps as u64
    }

    fn enter(&mut self, stage: Stage) {
        if self.stage == Some(stage) {
            return;
        }
        self.finish_current();

        let pb = self.multi.add(ProgressBar::new(self.stage_len(stage)));
        pb.set_style(Self::stage_style());
        pb.set_prefix(stage.display_name().to_string());
        pb.set_message("Starting...");
        self.stage = Some(stage);
        self.bar = Some(pb);
    }

    fn finish_current(&mut self) {
        if let (Some(pb), Some(stage)) = (self.bar.take(), self.stage) {
            pb.set_position(pb.length().unwrap_or(0));
            pb.finish_with_message(format!("{} complete!", stage.as_str().green()));
        }
    }

    fn advance(&self, message: String) {
        if let Some(pb) = &self.bar {
            pb.set_message(message);
            pb.inc(1);
        }
    }

    /// Update the bars for one event.
    pub fn observe(&mut self, event: &CouncilEvent) {
        match event {
            CouncilEvent::GeneratorStart { .. } => self.enter(Stage::Generation),
            CouncilEvent::GeneratorChunk { agent, .. } => {
                self.enter(Stage::Generation);
                if self.last_agent.as_deref() != Some(agent.as_str()) {
                    self.last_agent = Some(agent.clone());
                    self.advance(format!("{} {}", "v".green(), agent));
                }
            }
            CouncilEvent::CriticResult(verdict) => {
                self.enter(Stage::Critique);
                self.advance(format!("winner: {}", verdict.winner_id));
            }
            CouncilEvent::ArchitectResult(_) => {
                self.enter(Stage::Architect);
                self.advance("blueprint ready".to_string());
            }
            CouncilEvent::FinalizerChunk { .. } => {
                if self.stage != Some(Stage::Finalizer) {
                    self.enter(Stage::Finalizer);
                    if let Some(pb) = &self.bar {
                        pb.set_message("writing...");
                    }
                }
            }
            CouncilEvent::Done => self.finish_current(),
            CouncilEvent::Error { .. } => {
                if let Some(pb) = self.bar.take() {
                    pb.abandon_with_message(format!("{}", "failed".red()));
                }
            }
        }
    }

    /// Position and length of the active stage bar.
    pub fn current(&self) -> Option<(Stage, u64, u64)> {
        let stage = self.stage?;
        let pb = self.bar.as_ref()?;
        Some((stage, pb.position(), pb.length().unwrap_or(0)))
    }
}

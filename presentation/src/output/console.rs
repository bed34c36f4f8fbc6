//! Console rendering of a council run

use super::renderer::EventRenderer;
use colored::Colorize;
use council_domain::{Blueprint, CouncilEvent, CritiqueResult, Stage};

/// Renders events for a human reading the terminal.
///
/// Section headers are printed once, when the first event of a stage
/// arrives.
#[derive(Debug, Default)]
pub struct ConsoleRenderer {
    stage: Option<Stage>,
    current_agent: Option<String>,
}

impl ConsoleRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn enter(&mut self, stage: Stage, out: &mut String) {
        if self.stage != Some(stage) {
            self.stage = Some(stage);
            self.current_agent = None;
            out.push_str(&Self::section_header(stage.display_name()));
        }
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    fn format_verdict(verdict: &CritiqueResult) -> String {
        let mut out = format!(
            "\n{} {}\n",
            "Winner:".green().bold(),
            verdict.winner_id
        );
        if !verdict.rankings.is_empty() {
            out.push_str(&format!(
                "{} {}\n",
                "Rankings:".dimmed(),
                verdict.rankings.join(" > ")
            ));
        }
        if !verdict.reasoning.is_empty() {
            out.push_str(&format!("{}\n", verdict.reasoning));
        }
        for (agent, score) in &verdict.scores {
            out.push_str(&format!("  * {}: {}/10\n", agent, score));
        }
        for (agent, flaw) in &verdict.flaws {
            out.push_str(&format!("  {} {}: {}\n", "!".yellow(), agent, flaw));
        }
        out
    }

    fn format_blueprint(blueprint: &Blueprint) -> String {
        let mut out = String::new();
        if blueprint.is_degraded() {
            out.push_str(&format!(
                "\n{}\n",
                "Architect output could not be parsed".yellow()
            ));
        }
        out.push_str(&format!("\n{}\n", "Structure:".bold()));
        for (i, section) in blueprint.structure.iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", i + 1, section));
        }
        if !blueprint.tone_guidelines.is_empty() {
            out.push_str(&format!(
                "{} {}\n",
                "Tone:".bold(),
                blueprint.tone_guidelines
            ));
        }
        if !blueprint.missing_facts_to_add.is_empty() {
            out.push_str(&format!("{}\n", "Facts to add:".bold()));
            for fact in &blueprint.missing_facts_to_add {
                out.push_str(&format!("  * {}\n", fact));
            }
        }
        if !blueprint.critique_integration.is_empty() {
            out.push_str(&format!(
                "{} {}\n",
                "Critique integration:".bold(),
                blueprint.critique_integration
            ));
        }
        out
    }
}

impl EventRenderer for ConsoleRenderer {
    fn render(&mut self, event: &CouncilEvent) -> Option<String> {
        let mut out = String::new();
        match event {
            CouncilEvent::GeneratorStart { agent, model } => {
                self.enter(Stage::Generation, &mut out);
                out.push_str(&format!("{} {} ({})\n", "->".cyan(), agent, model.dimmed()));
            }
            CouncilEvent::GeneratorChunk { agent, chunk } => {
                self.enter(Stage::Generation, &mut out);
                if self.current_agent.as_deref() != Some(agent.as_str()) {
                    out.push_str(&format!(
                        "\n{}\n",
                        format!("── {} ──", agent).yellow().bold()
                    ));
                    self.current_agent = Some(agent.clone());
                }
                out.push_str(chunk);
            }
            CouncilEvent::CriticResult(verdict) => {
                self.enter(Stage::Critique, &mut out);
                out.push_str(&Self::format_verdict(verdict));
            }
            CouncilEvent::ArchitectResult(blueprint) => {
                self.enter(Stage::Architect, &mut out);
                out.push_str(&Self::format_blueprint(blueprint));
            }
            CouncilEvent::FinalizerChunk { chunk } => {
                if self.stage != Some(Stage::Finalizer) {
                    self.enter(Stage::Finalizer, &mut out);
                    out.push('\n');
                }
                out.push_str(chunk);
            }
            CouncilEvent::Done => {
                out.push('\n');
                out.push_str(&Self::footer());
            }
            CouncilEvent::Error { message } => {
                out.push_str(&format!("\n{} {}\n", "Error:".red().bold(), message));
            }
        }
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_all(events: &[CouncilEvent]) -> String {
        let mut renderer = ConsoleRenderer::new();
        events.iter().filter_map(|e| renderer.render(e)).collect()
    }

    #[test]
    fn test_agent_header_printed_once_per_agent() {
        let out = render_all(&[
            CouncilEvent::GeneratorChunk {
                agent: "The Academic".to_string(),
                chunk: "Part one ".to_string(),
            },
            CouncilEvent::GeneratorChunk {
                agent: "The Academic".to_string(),
                chunk: "part two".to_string(),
            },
        ]);
        assert_eq!(out.matches("The Academic").count(), 1);
        assert!(out.contains("Part one part two"));
        assert_eq!(out.matches(Stage::Generation.display_name()).count(), 1);
    }

    #[test]
    fn test_verdict_and_blueprint_sections() {
        let out = render_all(&[
            CouncilEvent::CriticResult(CritiqueResult::auto_win("The Skeptic")),
            CouncilEvent::ArchitectResult(Blueprint::degraded()),
            CouncilEvent::FinalizerChunk {
                chunk: "Final words".to_string(),
            },
            CouncilEvent::Done,
        ]);
        assert!(out.contains("The Skeptic"));
        assert!(out.contains(Stage::Critique.display_name()));
        assert!(out.contains("could not be parsed"));
        assert!(out.contains("Final words"));
    }

    #[test]
    fn test_error_message_rendered() {
        let out = render_all(&[CouncilEvent::error("No valid agents selected.")]);
        assert!(out.contains("No valid agents selected."));
    }
}

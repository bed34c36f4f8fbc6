//! Renderer trait and the machine-readable encoders

use super::console::ConsoleRenderer;
use council_domain::{CouncilEvent, OutputFormat};

/// Turns council events into text for stdout.
pub trait EventRenderer: Send {
    /// Text to write for this event, if any.
    fn render(&mut self, event: &CouncilEvent) -> Option<String>;
}

/// Build the renderer for an output format.
pub fn renderer_for(format: OutputFormat) -> Box<dyn EventRenderer> {
    match format {
        OutputFormat::Console => Box::new(ConsoleRenderer::new()),
        OutputFormat::Sse => Box::new(SseRenderer),
        OutputFormat::Jsonl => Box::new(JsonLinesRenderer),
        OutputFormat::Final => Box::new(FinalRenderer),
    }
}

/// `event: <name>\ndata: <json>\n\n` frames
pub struct SseRenderer;

impl EventRenderer for SseRenderer {
    fn render(&mut self, event: &CouncilEvent) -> Option<String> {
        Some(event.to_sse())
    }
}

/// One `{"event": .., "data": ..}` object per line
pub struct JsonLinesRenderer;

impl EventRenderer for JsonLinesRenderer {
    fn render(&mut self, event: &CouncilEvent) -> Option<String> {
        Some(format!("{}\n", event.to_json_line()))
    }
}

/// Streams only the final answer; errors are reported by the caller.
pub struct FinalRenderer;

impl EventRenderer for FinalRenderer {
    fn render(&mut self, event: &CouncilEvent) -> Option<String> {
        match event {
            CouncilEvent::FinalizerChunk { chunk } => Some(chunk.clone()),
            CouncilEvent::Done => Some("\n".to_string()),
            _ => None,
        }
    }
}

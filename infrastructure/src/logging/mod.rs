//! Logging infrastructure - per-run flight-recorder traces.
//!
//! Provides [`MarkdownTraceRecorder`], a Markdown file writer that implements
//! the [`TraceSink`](council_application::TraceSink) port.

mod markdown_trace;

pub use markdown_trace::{MarkdownTraceFactory, MarkdownTraceRecorder, redact_secrets};

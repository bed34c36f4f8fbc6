//! Markdown flight-recorder trace for council runs.
//!
//! Each run gets its own `trace_<YYYYmmdd_HHMMSS>.md` file: a header, one
//! section per step with the fenced input and output, and a closing
//! `# End of Trace` line written by [`TraceSink::finalize`].

use council_application::ports::trace_sink::{TraceFactory, TraceSink};
use regex::Regex;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock, Mutex};
use tracing::{debug, warn};

/// Credential-shaped substrings that must never reach a trace file.
static SECRET_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:sk-or-v1-[A-Za-z0-9_\-]+|sk-[A-Za-z0-9_\-]{8,}|Bearer\s+[A-Za-z0-9._\-]+)")
        .expect("valid regex")
});

/// Replace anything that looks like an API key with `[REDACTED]`.
pub fn redact_secrets(text: &str) -> String {
    SECRET_PATTERN.replace_all(text, "[REDACTED]").into_owned()
}

/// Trace sink writing one Markdown file per run.
///
/// Thread-safe via `Mutex<Option<BufWriter<File>>>`; the writer is taken on
/// finalize so later steps are dropped.
pub struct MarkdownTraceRecorder {
    writer: Mutex<Option<BufWriter<File>>>,
    path: PathBuf,
}

impl MarkdownTraceRecorder {
    /// Create a new trace file inside `dir`.
    ///
    /// Creates the directory if it doesn't exist. Returns `None` if the file
    /// cannot be created.
    pub fn create(dir: impl AsRef<Path>) -> Option<Self> {
        let dir = dir.as_ref();
        if let Err(e) = std::fs::create_dir_all(dir) {
            warn!("Could not create trace directory {}: {}", dir.display(), e);
            return None;
        }

        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
        let path = unique_path(dir, &stamp);
        let file = match File::create(&path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not create trace file {}: {}", path.display(), e);
                return None;
            }
        };

        let mut writer = BufWriter::new(file);
        let _ = write!(
            writer,
            "# Flight Recorder Trace: {}\n\nThis file logs the entire lifecycle of the request.\n\n",
            stamp
        );
        let _ = writer.flush();

        Some(Self {
            writer: Mutex::new(Some(writer)),
            path,
        })
    }

    /// Get the path to the trace file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// `trace_<stamp>.md`, suffixed when two runs start in the same second.
fn unique_path(dir: &Path, stamp: &str) -> PathBuf {
    let mut path = dir.join(format!("trace_{}.md", stamp));
    let mut n = 1;
    while path.exists() {
        path = dir.join(format!("trace_{}_{}.md", stamp, n));
        n += 1;
    }
    path
}

impl TraceSink for MarkdownTraceRecorder {
    fn log_step(&self, phase: &str, agent_tag: &str, input: &str, output: &str) {
        let timestamp = chrono::Local::now().format("%H:%M:%S");
        let entry = format!(
            "## Phase: {}\n**Timestamp:** {}\n**Agent:** {}\n\n### Inputs\n```text\n{}\n```\n\n### Outputs\n```json\n{}\n```\n---\n\n",
            phase,
            timestamp,
            agent_tag,
            redact_secrets(input),
            redact_secrets(output)
        );

        if let Ok(mut guard) = self.writer.lock()
            && let Some(writer) = guard.as_mut()
        {
            let _ = writer.write_all(entry.as_bytes());
            // Flush every step so a crashed run still leaves a readable trace
            let _ = writer.flush();
        }
    }

    fn finalize(&self) -> Option<PathBuf> {
        let mut guard = self.writer.lock().ok()?;
        let mut writer = guard.take()?;
        let _ = writer.write_all(b"\n# End of Trace\n");
        let _ = writer.flush();
        debug!("Trace written to {}", self.path.display());
        Some(self.path.clone())
    }
}

impl Drop for MarkdownTraceRecorder {
    fn drop(&mut self) {
        self.finalize();
    }
}

/// Opens a [`MarkdownTraceRecorder`] per run under a fixed directory.
///
/// Falls back to no tracing for a run whose file cannot be created.
pub struct MarkdownTraceFactory {
    dir: PathBuf,
}

impl MarkdownTraceFactory {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl TraceFactory for MarkdownTraceFactory {
    fn open(&self) -> Arc<dyn TraceSink> {
        match MarkdownTraceRecorder::create(&self.dir) {
            Some(recorder) => Arc::new(recorder),
            None => Arc::new(council_application::NoTrace),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_file_layout() {
        let dir = tempfile::tempdir().unwrap();
        let recorder = MarkdownTraceRecorder::create(dir.path()).unwrap();
        let name = recorder.path().file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("trace_") && name.ends_with(".md"));

        recorder.log_step("Generators", "Generator-The Skeptic", "query", "draft");
        let path = recorder.finalize().unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.starts_with("# Flight Recorder Trace: "));
        assert!(content.contains("## Phase: Generators\n"));
        assert!(content.contains("**Agent:** Generator-The Skeptic"));
        assert!(content.contains("```text\nquery\n```"));
        assert!(content.contains("```json\ndraft\n```"));
        assert!(content.trim_end().ends_with("# End of Trace"));
    }

    #[test]
    fn test_finalize_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let recorder = MarkdownTraceRecorder::create(dir.path()).unwrap();
        assert!(recorder.finalize().is_some());
        assert!(recorder.finalize().is_none());
        recorder.log_step("Late", "System", "ignored", "ignored");
        drop(recorder);

        let entry = std::fs::read_dir(dir.path()).unwrap().next().unwrap().unwrap();
        let content = std::fs::read_to_string(entry.path()).unwrap();
        assert_eq!(content.matches("# End of Trace").count(), 1);
        assert!(!content.contains("Late"));
    }

    #[test]
    fn test_secrets_are_redacted() {
        let dir = tempfile::tempdir().unwrap();
        let recorder = MarkdownTraceRecorder::create(dir.path()).unwrap();
        recorder.log_step(
            "Initialization",
            "System",
            "key sk-or-v1-abc123def456",
            "header Authorization: Bearer abc.def-ghi",
        );
        let path = recorder.finalize().unwrap();
        let content = std::fs::read_to_string(path).unwrap();
        assert!(!content.contains("abc123def456"));
        assert!(!content.contains("abc.def-ghi"));
        assert_eq!(content.matches("[REDACTED]").count(), 2);
    }

    #[test]
    fn test_redact_leaves_plain_text() {
        assert_eq!(redact_secrets("ask the skeptic"), "ask the skeptic");
        assert_eq!(redact_secrets("sk-proj1234567890"), "[REDACTED]");
    }

    #[test]
    fn test_same_second_runs_get_distinct_files() {
        let dir = tempfile::tempdir().unwrap();
        let first = unique_path(dir.path(), "20260101_120000");
        std::fs::write(&first, "x").unwrap();
        let second = unique_path(dir.path(), "20260101_120000");
        assert_ne!(first, second);
        assert!(second.to_string_lossy().ends_with("trace_20260101_120000_1.md"));
    }

    #[test]
    fn test_factory_falls_back_when_dir_unusable() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "file").unwrap();
        let factory = MarkdownTraceFactory::new(blocker.join("traces"));
        let sink = factory.open();
        sink.log_step("Initialization", "System", "q", "a");
        assert!(sink.finalize().is_none());
    }
}

//! Port for per-run workflow traces.
//!
//! A trace records every prompt and response of a council run, step by
//! step, for later inspection. This is separate from `tracing`-based
//! operation logs: tracing handles diagnostic messages, while a trace
//! captures the full transcript of one run.

use std::path::PathBuf;
use std::sync::Arc;

/// Sink for the steps of one run.
///
/// `log_step` is synchronous and non-fallible so that trace failures never
/// disrupt the run. `finalize` is idempotent.
pub trait TraceSink: Send + Sync {
    /// Record one step: stage name, agent tag, the input sent, the output received.
    fn log_step(&self, phase: &str, agent_tag: &str, input: &str, output: &str);

    /// Flush and close the trace. Returns where it was written, if anywhere.
    fn finalize(&self) -> Option<PathBuf>;
}

/// Opens a fresh [`TraceSink`] for each run.
pub trait TraceFactory: Send + Sync {
    fn open(&self) -> Arc<dyn TraceSink>;
}

/// No-op implementation for tests and when tracing is disabled.
pub struct NoTrace;

impl TraceSink for NoTrace {
    fn log_step(&self, _phase: &str, _agent_tag: &str, _input: &str, _output: &str) {}

    fn finalize(&self) -> Option<PathBuf> {
        None
    }
}

impl TraceFactory for NoTrace {
    fn open(&self) -> Arc<dyn TraceSink> {
        Arc::new(NoTrace)
    }
}

/// Finalizes the wrapped sink when dropped, so aborted and cancelled runs
/// still close their trace.
pub struct TraceGuard {
    sink: Arc<dyn TraceSink>,
}

impl TraceGuard {
    pub fn new(sink: Arc<dyn TraceSink>) -> Self {
        Self { sink }
    }

    pub fn log_step(&self, phase: &str, agent_tag: &str, input: &str, output: &str) {
        self.sink.log_step(phase, agent_tag, input, output);
    }
}

impl Drop for TraceGuard {
    fn drop(&mut self) {
        self.sink.finalize();
    }
}

//! Run outcome as seen by the stream consumer

use council_domain::CouncilEvent;

/// How a streamed run ended, judged by its terminal event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RunOutcome {
    /// No terminal event has arrived
    #[default]
    Unfinished,
    Completed,
    Failed(String),
}

impl RunOutcome {
    /// Record `event` if it ends the stream.
    pub fn observe(&mut self, event: &CouncilEvent) {
        if !event.is_terminal() {
            return;
        }
        *self = match event {
            CouncilEvent::Error { message } => RunOutcome::Failed(message.clone()),
            _ => RunOutcome::Completed,
        };
    }

    /// Process exit status.
    ///
    /// A stream that stopped without `done` or `error` was interrupted when
    /// cancellation was requested, and failed otherwise.
    pub fn exit_status(&self, cancel_requested: bool) -> u8 {
        match self {
            RunOutcome::Completed => 0,
            RunOutcome::Failed(_) => 1,
            RunOutcome::Unfinished if cancel_requested => 130,
            RunOutcome::Unfinished => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_after_done_still_succeeds() {
        let mut outcome = RunOutcome::default();
        outcome.observe(&CouncilEvent::FinalizerChunk {
            chunk: "answer".to_string(),
        });
        assert_eq!(outcome, RunOutcome::Unfinished);
        outcome.observe(&CouncilEvent::Done);
        assert_eq!(outcome, RunOutcome::Completed);
        assert_eq!(outcome.exit_status(true), 0);
    }

    #[test]
    fn test_cancel_before_done_is_interrupted() {
        let outcome = RunOutcome::default();
        assert_eq!(outcome.exit_status(true), 130);
        assert_eq!(outcome.exit_status(false), 1);
    }

    #[test]
    fn test_error_event_fails() {
        let mut outcome = RunOutcome::default();
        outcome.observe(&CouncilEvent::error("No valid agents selected."));
        assert_eq!(
            outcome,
            RunOutcome::Failed("No valid agents selected.".to_string())
        );
        assert_eq!(outcome.exit_status(true), 1);
    }
}

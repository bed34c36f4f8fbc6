//! Event channel between a run and its consumer.

use super::types::RunCouncilError;
use council_domain::CouncilEvent;
use tokio::sync::mpsc;

/// Default channel capacity for [`EventEmitter::channel`].
pub const EVENT_BUFFER: usize = 64;

/// Sending half of a run's event stream.
///
/// A closed receiver means the consumer went away; the run treats that
/// as cancellation.
#[derive(Debug, Clone)]
pub struct EventEmitter {
    tx: mpsc::Sender<CouncilEvent>,
}

impl EventEmitter {
    pub fn new(tx: mpsc::Sender<CouncilEvent>) -> Self {
        Self { tx }
    }

    /// Create an emitter and the receiver the consumer reads from.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<CouncilEvent>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self::new(tx), rx)
    }

    pub async fn emit(&self, event: CouncilEvent) -> Result<(), RunCouncilError> {
        self.tx
            .send(event)
            .await
            .map_err(|_| RunCouncilError::Cancelled)
    }
}

//! Change notifications so list views know when to re-query.

use serde::Serialize;
use tokio::sync::broadcast;
use tracing::trace;

const CHANNEL_CAPACITY: usize = 64;

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChangeEvent {
    /// A phrase was added, updated or deleted.
    PhrasesChanged,
    /// A social upload was accepted by the posting service.
    UploadsChanged,
}

impl ChangeEvent {
    /// SSE event name.
    pub fn name(self) -> &'static str {
        match self {
            ChangeEvent::PhrasesChanged => "phrases",
            ChangeEvent::UploadsChanged => "uploads",
        }
    }
}

/// Fan-out of [`ChangeEvent`]s. Cloning shares the same channel.
#[derive(Clone, Debug)]
pub struct ChangeNotifier {
    tx: broadcast::Sender<ChangeEvent>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    pub fn publish(&self, event: ChangeEvent) {
        // no subscribers is fine
        let receivers = self.tx.send(event).unwrap_or(0);
        trace!(event = event.name(), receivers, "published change event");
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.tx.subscribe()
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

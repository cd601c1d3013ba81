use tokio::sync::broadcast;

use crate::id::SessionId;

/// State change notifications for renderers observing the chat core.
///
/// Events carry only what changed; renderers read the rest from the
/// state snapshot they hold a reference to.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatEvent {
    SessionsChanged,
    ActiveSessionChanged(SessionId),
    WindowChanged,
    StatusChanged,
    ErrorRaised(String),
}

pub struct EventBus {
    sender: broadcast::Sender<ChatEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChatEvent> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: ChatEvent) -> usize {
        tracing::trace!(?event, "publish");
        self.sender.send(event).unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}

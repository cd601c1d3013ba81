//! Input buffer and per-message send tracking.

use counsel_common::{ClientId, SessionId};

/// State of the input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerPhase {
    Idle,
    Composing,
}

/// State of one outgoing message after it left the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendState {
    Sending,
    Reconciled,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outgoing {
    pub client_id: ClientId,
    pub session_id: SessionId,
    pub state: SendState,
}

#[derive(Debug, Default)]
pub struct Composer {
    input: String,
    outgoing: Vec<Outgoing>,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn phase(&self) -> ComposerPhase {
        if self.input.is_empty() {
            ComposerPhase::Idle
        } else {
            ComposerPhase::Composing
        }
    }

    /// Take the raw buffer if it may be sent: non-blank and some session
    /// active. Otherwise nothing changes.
    pub fn take_sendable(&mut self, active: Option<SessionId>) -> Option<String> {
        if self.input.trim().is_empty() || active.is_none() {
            return None;
        }
        Some(std::mem::take(&mut self.input))
    }

    pub fn track(&mut self, client_id: ClientId, session_id: SessionId) {
        self.outgoing.push(Outgoing {
            client_id,
            session_id,
            state: SendState::Sending,
        });
    }

    /// Settle a send with the server's answer and stop tracking it.
    /// Returns the settled record, or `None` if the send was not tracked.
    pub fn resolve(&mut self, client_id: ClientId, delivered: bool) -> Option<Outgoing> {
        let index = self.outgoing.iter().position(|o| o.client_id == client_id)?;
        let mut settled = self.outgoing.swap_remove(index);
        settled.state = if delivered {
            SendState::Reconciled
        } else {
            SendState::Failed
        };
        Some(settled)
    }

    pub fn state_of(&self, client_id: ClientId) -> Option<SendState> {
        self.outgoing
            .iter()
            .find(|o| o.client_id == client_id)
            .map(|o| o.state)
    }

    pub fn outgoing(&self) -> &[Outgoing] {
        &self.outgoing
    }

    /// "Counselor is typing": true while any send awaits its response.
    pub fn is_typing(&self) -> bool {
        self.outgoing.iter().any(|o| o.state == SendState::Sending)
    }
}

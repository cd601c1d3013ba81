//! Runs the state machine's requests against a chat service.
//!
//! Every request is spawned as its own tokio task, so requests overlap
//! freely. Completions come back over one channel and are applied one at a
//! time, which keeps all mutation on the caller's task.

#[cfg(test)]
mod tests;

use std::sync::Arc;

use chrono::Utc;
use counsel_common::{ChatEvent, EventBus, SessionId, UserId};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info};

use crate::state::{ChatState, Completion, Request};
use crate::ChatApi;

pub struct Orchestrator {
    state: ChatState,
    api: Arc<dyn ChatApi>,
    user_id: UserId,
    events: EventBus,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
}

impl Orchestrator {
    pub fn new(api: Arc<dyn ChatApi>, user_id: UserId, page_size: u32) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        info!(%user_id, page_size, "chat orchestrator ready");
        Self {
            state: ChatState::new(page_size),
            api,
            user_id,
            events: EventBus::default(),
            tx,
            rx,
        }
    }

    pub fn state(&self) -> &ChatState {
        &self.state
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Subscribe to state change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<ChatEvent> {
        self.events.subscribe()
    }

    pub fn load_sessions(&mut self) {
        let request = self.state.load_sessions();
        self.dispatch(request);
        self.publish();
    }

    /// Returns false when the title was refused.
    pub fn create_session(&mut self, title: &str) -> bool {
        let issued = self.state.create_session(title).map(|r| self.dispatch(r));
        self.publish();
        issued.is_some()
    }

    /// Returns false when nothing was fetched.
    pub fn select_session(&mut self, id: SessionId) -> bool {
        let issued = self.state.select_session(id).map(|r| self.dispatch(r));
        self.publish();
        issued.is_some()
    }

    /// Returns false when there is no further page.
    pub fn advance_page(&mut self) -> bool {
        let issued = self.state.advance_page().map(|r| self.dispatch(r));
        self.publish();
        issued.is_some()
    }

    pub fn reload(&mut self) {
        for request in self.state.reload() {
            self.dispatch(request);
        }
        self.publish();
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.state.set_input(text);
    }

    /// Send the input buffer. Returns false when the send was refused.
    pub fn send(&mut self) -> bool {
        let issued = self.state.send(Utc::now()).map(|r| self.dispatch(r));
        self.publish();
        issued.is_some()
    }

    /// Wait for the next completion and apply it.
    ///
    /// Returns false immediately when nothing is in flight.
    pub async fn step(&mut self) -> bool {
        if self.state.in_flight() == 0 {
            return false;
        }
        let Some(completion) = self.rx.recv().await else {
            return false;
        };
        for request in self.state.apply(completion) {
            self.dispatch(request);
        }
        self.publish();
        true
    }

    /// Apply completions until nothing is in flight, follow-ups included.
    pub async fn settle(&mut self) {
        while self.step().await {}
    }

    fn dispatch(&self, request: Request) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        let user_id = self.user_id;
        tokio::spawn(async move {
            let completion = execute(api.as_ref(), user_id, request).await;
            // The receiver only goes away with the orchestrator itself.
            let _ = tx.send(completion);
        });
    }

    fn publish(&mut self) {
        for event in self.state.drain_events() {
            self.events.publish(event);
        }
    }
}

/// Run one request and package its outcome.
pub(crate) async fn execute(api: &dyn ChatApi, user_id: UserId, request: Request) -> Completion {
    match request {
        Request::ListSessions { seq } => Completion::Sessions {
            seq,
            result: api.list_sessions(user_id).await,
        },
        Request::CreateSession { title } => Completion::SessionCreated {
            result: api.create_session(user_id, &title).await,
        },
        Request::ListMessages(ticket) => {
            debug!(seq = ticket.seq, session_id = %ticket.session_id, "fetching page");
            Completion::Page {
                ticket,
                result: api
                    .list_messages(user_id, ticket.session_id, ticket.page_index, ticket.page_size)
                    .await,
            }
        }
        Request::SendMessage { ticket, text } => Completion::Sent {
            ticket,
            result: api.send_message(user_id, ticket.session_id, &text).await,
        },
    }
}

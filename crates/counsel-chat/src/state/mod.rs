//! The chat state machine.
//!
//! `ChatState` never performs I/O. User actions mutate it and return the
//! requests that must be run; each request's outcome comes back as a
//! [`Completion`] passed to [`ChatState::apply`], which may ask for
//! follow-up requests. Completions may arrive in any order: fetches carry
//! tickets, and a completion whose ticket is no longer the latest for the
//! current selection is discarded.

mod request;


pub use request::{Completion, PageTicket, Request, SendTicket};

use chrono::{DateTime, Utc};
use counsel_common::{ApiError, ChatError, ChatEvent, ClientId, SessionId};
use tracing::debug;

use crate::composer::{Composer, ComposerPhase};
use crate::model::{Message, MessagePage, Session};
use crate::status::RequestStatus;
use crate::store::{Selection, SessionStore};
use crate::window::MessageWindow;

pub struct ChatState {
    sessions: SessionStore,
    window: MessageWindow,
    composer: Composer,
    status: RequestStatus,
    next_seq: u64,
    /// Latest issued session listing.
    sessions_seq: Option<u64>,
    /// Latest issued page fetch.
    page_seq: Option<u64>,
    events: Vec<ChatEvent>,
}

impl ChatState {
    pub fn new(page_size: u32) -> Self {
        Self {
            sessions: SessionStore::new(),
            window: MessageWindow::new(page_size),
            composer: Composer::new(),
            status: RequestStatus::new(),
            next_seq: 0,
            sessions_seq: None,
            page_seq: None,
            events: Vec::new(),
        }
    }

    // -- observation --------------------------------------------------------

    pub fn sessions(&self) -> &[Session] {
        self.sessions.sessions()
    }

    pub fn active_session(&self) -> Option<&Session> {
        self.sessions.active()
    }

    pub fn messages(&self) -> &[Message] {
        self.window.messages()
    }

    pub fn window(&self) -> &MessageWindow {
        &self.window
    }

    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    pub fn input(&self) -> &str {
        self.composer.input()
    }

    pub fn composer_phase(&self) -> ComposerPhase {
        self.composer.phase()
    }

    pub fn page_index(&self) -> u32 {
        self.window.page_index()
    }

    pub fn total(&self) -> u64 {
        self.window.total()
    }

    pub fn can_load_more(&self) -> bool {
        self.window.can_load_more()
    }

    pub fn loading(&self) -> bool {
        self.status.loading()
    }

    pub fn in_flight(&self) -> usize {
        self.status.in_flight()
    }

    pub fn error(&self) -> Option<&str> {
        self.status.error()
    }

    pub fn typing(&self) -> bool {
        self.composer.is_typing()
    }

    /// Whether a renderer should offer the send control.
    pub fn composer_enabled(&self) -> bool {
        self.sessions.active().is_some() && !self.status.loading()
    }

    /// Events produced since the last call, oldest first.
    pub fn drain_events(&mut self) -> Vec<ChatEvent> {
        std::mem::take(&mut self.events)
    }

    // -- user actions -------------------------------------------------------

    pub fn load_sessions(&mut self) -> Request {
        let seq = self.issue_seq();
        self.sessions_seq = Some(seq);
        self.begin();
        debug!(seq, "issue session listing");
        Request::ListSessions { seq }
    }

    /// Refused (no request) when the title is blank.
    pub fn create_session(&mut self, title: &str) -> Option<Request> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        self.begin();
        debug!(title, "issue session create");
        Some(Request::CreateSession {
            title: title.to_string(),
        })
    }

    /// Make `id` the active session and fetch its first page.
    ///
    /// Selecting the active session again changes nothing, except that a
    /// window whose last fetch failed is fetched again.
    pub fn select_session(&mut self, id: SessionId) -> Option<Request> {
        match self.sessions.select(id) {
            Selection::Changed => Some(self.activate(id)),
            Selection::Unchanged if self.window.is_failed() => Some(self.fetch_page(id)),
            Selection::Unchanged => None,
            Selection::Unknown => {
                debug!(%id, "ignoring selection of unlisted session");
                None
            }
        }
    }

    /// Fetch the next page, if there is one.
    pub fn advance_page(&mut self) -> Option<Request> {
        let id = self.sessions.active_id()?;
        if !self.window.advance() {
            return None;
        }
        self.events.push(ChatEvent::WindowChanged);
        Some(self.fetch_page(id))
    }

    /// Refetch the session list and the current page.
    pub fn reload(&mut self) -> Vec<Request> {
        let mut requests = vec![self.load_sessions()];
        if let Some(id) = self.sessions.active_id() {
            requests.push(self.fetch_page(id));
        }
        requests
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.composer.set_input(text);
    }

    /// Send the input buffer, showing it optimistically right away.
    ///
    /// Refused (no state change, no request) for blank input or when no
    /// session is active.
    pub fn send(&mut self, now: DateTime<Utc>) -> Option<Request> {
        let session_id = self.sessions.active_id();
        let text = self.composer.take_sendable(session_id)?;
        let session_id = session_id?;

        let client_id = ClientId::new();
        self.window
            .push_pending(Message::pending(client_id, text.clone(), now));
        self.composer.track(client_id, session_id);
        self.events.push(ChatEvent::WindowChanged);
        self.begin();

        debug!(client_id = %client_id.short(), %session_id, "issue send");
        Some(Request::SendMessage {
            ticket: SendTicket {
                client_id,
                session_id,
            },
            text,
        })
    }

    // -- completions --------------------------------------------------------

    /// Apply one completion and return any follow-up requests.
    pub fn apply(&mut self, completion: Completion) -> Vec<Request> {
        self.status.finish();
        self.events.push(ChatEvent::StatusChanged);

        match completion {
            Completion::Sessions { seq, result } => self.apply_sessions(seq, result),
            Completion::SessionCreated { result } => self.apply_created(result),
            Completion::Page { ticket, result } => self.apply_page(ticket, result),
            Completion::Sent { ticket, result } => self.apply_sent(ticket, result),
        }
    }

    fn apply_sessions(
        &mut self,
        seq: u64,
        result: Result<Vec<Session>, ApiError>,
    ) -> Vec<Request> {
        if self.sessions_seq != Some(seq) {
            debug!(seq, "discarding stale session listing");
            return Vec::new();
        }

        match result {
            Ok(sessions) => {
                debug!(count = sessions.len(), "sessions loaded");
                let activated = self.sessions.replace_all(sessions);
                self.events.push(ChatEvent::SessionsChanged);
                activated.map(|id| self.activate(id)).into_iter().collect()
            }
            Err(e) => {
                self.fail(ChatError::SessionList(e));
                Vec::new()
            }
        }
    }

    fn apply_created(
        &mut self,
        result: Result<Session, ApiError>,
    ) -> Vec<Request> {
        match result {
            Ok(session) => {
                let id = session.id;
                debug!(%id, "session created");
                self.sessions.prepend_and_activate(session);
                self.events.push(ChatEvent::SessionsChanged);
                vec![self.activate(id)]
            }
            Err(e) => {
                self.fail(ChatError::SessionCreate(e));
                Vec::new()
            }
        }
    }

    fn apply_page(
        &mut self,
        ticket: PageTicket,
        result: Result<MessagePage, ApiError>,
    ) -> Vec<Request> {
        let current = self.page_seq == Some(ticket.seq)
            && self.window.session_id() == Some(ticket.session_id)
            && self.window.page_index() == ticket.page_index;
        if !current {
            debug!(
                seq = ticket.seq,
                session_id = %ticket.session_id,
                page = ticket.page_index,
                "discarding stale page"
            );
            return Vec::new();
        }

        match result {
            Ok(page) => {
                debug!(
                    session_id = %ticket.session_id,
                    page = ticket.page_index,
                    count = page.messages.len(),
                    total = page.total,
                    "page loaded"
                );
                self.window.replace_page(page);
            }
            Err(e) => {
                self.window.fail();
                self.fail(ChatError::MessageList(e));
            }
        }
        self.events.push(ChatEvent::WindowChanged);
        Vec::new()
    }

    fn apply_sent(
        &mut self,
        ticket: SendTicket,
        result: Result<(), ApiError>,
    ) -> Vec<Request> {
        if self.composer.resolve(ticket.client_id, result.is_ok()).is_none() {
            debug!(client_id = %ticket.client_id.short(), "completion for untracked send");
        }

        match result {
            Ok(()) => {
                debug!(client_id = %ticket.client_id.short(), "send confirmed, reconciling");
                if self.window.mark_accepted(ticket.client_id) {
                    self.events.push(ChatEvent::WindowChanged);
                }
                let mut follow_up = Vec::new();
                if self.sessions.is_active(ticket.session_id) {
                    follow_up.push(self.fetch_page(ticket.session_id));
                }
                follow_up.push(self.load_sessions());
                follow_up
            }
            Err(e) => {
                self.fail(ChatError::MessageSend(e));
                Vec::new()
            }
        }
    }

    // -- internals ----------------------------------------------------------

    /// Reset the window onto a newly active session and fetch page 0.
    fn activate(&mut self, id: SessionId) -> Request {
        self.window.reset(Some(id));
        self.events.push(ChatEvent::ActiveSessionChanged(id));
        self.events.push(ChatEvent::WindowChanged);
        self.fetch_page(id)
    }

    fn fetch_page(&mut self, session_id: SessionId) -> Request {
        let seq = self.issue_seq();
        self.page_seq = Some(seq);
        self.begin();
        let ticket = PageTicket {
            seq,
            session_id,
            page_index: self.window.page_index(),
            page_size: self.window.page_size(),
        };
        debug!(seq, %session_id, page = ticket.page_index, "issue page fetch");
        Request::ListMessages(ticket)
    }

    fn issue_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    fn begin(&mut self) {
        self.status.begin();
        self.events.push(ChatEvent::StatusChanged);
    }

    fn fail(&mut self, err: ChatError) {
        self.status.fail(&err);
        self.events.push(ChatEvent::ErrorRaised(err.to_string()));
    }
}

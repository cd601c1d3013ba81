//! Session list and the active session pointer.

use counsel_common::SessionId;

use crate::model::Session;

/// Ordered session list (server order) plus at most one active session.
///
/// The active session is kept as a record of its own so it stays
/// selectable even if a later listing no longer contains it.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Vec<Session>,
    active: Option<Session>,
}

/// Outcome of [`SessionStore::select`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// A different session became active.
    Changed,
    /// The session was already active.
    Unchanged,
    /// No session with that id is listed.
    Unknown,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn active(&self) -> Option<&Session> {
        self.active.as_ref()
    }

    pub fn active_id(&self) -> Option<SessionId> {
        self.active.as_ref().map(|s| s.id)
    }

    pub fn is_active(&self, id: SessionId) -> bool {
        self.active_id() == Some(id)
    }

    pub fn get(&self, id: SessionId) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id == id)
    }

    /// Replace the whole list with a fresh listing.
    ///
    /// Refreshes the active record if the listing still contains it. When
    /// nothing is active, the first listed session is activated and its id
    /// returned.
    pub fn replace_all(&mut self, sessions: Vec<Session>) -> Option<SessionId> {
        self.sessions = sessions;

        match self.active_id() {
            Some(id) => {
                if let Some(fresh) = self.get(id).cloned() {
                    self.active = Some(fresh);
                }
                None
            }
            None => {
                let first = self.sessions.first().cloned()?;
                let id = first.id;
                self.active = Some(first);
                Some(id)
            }
        }
    }

    /// Put a newly created session at the front and make it active.
    pub fn prepend_and_activate(&mut self, session: Session) {
        self.sessions.retain(|s| s.id != session.id);
        self.sessions.insert(0, session.clone());
        self.active = Some(session);
    }

    pub fn select(&mut self, id: SessionId) -> Selection {
        if self.is_active(id) {
            return Selection::Unchanged;
        }
        match self.get(id).cloned() {
            Some(session) => {
                self.active = Some(session);
                Selection::Changed
            }
            None => Selection::Unknown,
        }
    }
}

//! Requests the state machine asks to have run, and their completions.

use counsel_common::{ApiError, ClientId, SessionId};

use crate::model::{MessagePage, Session};

/// Identifies the page fetch a completion answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTicket {
    pub seq: u64,
    pub session_id: SessionId,
    pub page_index: u32,
    pub page_size: u32,
}

/// Identifies the send a completion answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendTicket {
    pub client_id: ClientId,
    pub session_id: SessionId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    ListSessions { seq: u64 },
    CreateSession { title: String },
    ListMessages(PageTicket),
    SendMessage { ticket: SendTicket, text: String },
}

#[derive(Debug)]
pub enum Completion {
    Sessions {
        seq: u64,
        result: Result<Vec<Session>, ApiError>,
    },
    SessionCreated {
        result: Result<Session, ApiError>,
    },
    Page {
        ticket: PageTicket,
        result: Result<MessagePage, ApiError>,
    },
    Sent {
        ticket: SendTicket,
        result: Result<(), ApiError>,
    },
}

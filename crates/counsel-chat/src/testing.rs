//! Fixtures and an in-memory chat service for tests.

use std::collections::{HashMap, HashSet};
use std::ops::Range;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use counsel_common::{ApiError, SessionId, UserId};

use crate::model::{MessagePage, MessageRecord, Sender, Session};
use crate::ChatApi;

pub(crate) fn ts() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()
}

pub(crate) fn session(id: i64, title: &str) -> Session {
    Session {
        id: SessionId(id),
        title: title.to_string(),
        created_at: ts(),
    }
}

pub(crate) fn record(id: i64, text: &str) -> MessageRecord {
    MessageRecord {
        id,
        text: text.to_string(),
        sender: Sender::Counselor,
        created_at: ts(),
        status: None,
    }
}

pub(crate) fn page(ids: Range<i64>, total: u64) -> MessagePage {
    MessagePage {
        messages: ids.map(|id| record(id, &format!("message {id}"))).collect(),
        total,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Op {
    ListSessions,
    CreateSession,
    ListMessages,
    SendMessage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    ListSessions(UserId),
    CreateSession(UserId, String),
    ListMessages {
        session_id: SessionId,
        page: u32,
        limit: u32,
    },
    SendMessage {
        session_id: SessionId,
        text: String,
    },
}

#[derive(Default)]
struct Backend {
    sessions: Vec<Session>,
    messages: HashMap<SessionId, Vec<MessageRecord>>,
    next_message_id: i64,
    failing: HashSet<Op>,
    calls: Vec<Call>,
}

/// Chat service double: answers from memory, records every call and can
/// be told to fail any operation with HTTP 500.
#[derive(Default)]
pub(crate) struct FakeChatApi {
    backend: Mutex<Backend>,
}

impl FakeChatApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_sessions(self, sessions: Vec<Session>) -> Self {
        self.backend.lock().unwrap().sessions = sessions;
        self
    }

    /// Seed `count` counselor messages into a session.
    pub(crate) fn with_messages(self, session_id: i64, count: i64) -> Self {
        {
            let mut backend = self.backend.lock().unwrap();
            let start = backend.next_message_id + 1;
            let records: Vec<_> = (start..start + count)
                .map(|id| record(id, &format!("message {id}")))
                .collect();
            backend.next_message_id += count;
            backend
                .messages
                .entry(SessionId(session_id))
                .or_default()
                .extend(records);
        }
        self
    }

    pub(crate) fn fail(&self, op: Op) {
        self.backend.lock().unwrap().failing.insert(op);
    }

    pub(crate) fn succeed(&self, op: Op) {
        self.backend.lock().unwrap().failing.remove(&op);
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.backend.lock().unwrap().calls.clone()
    }

    pub(crate) fn count(&self, op: Op) -> usize {
        self.calls()
            .iter()
            .filter(|call| {
                let call_op = match call {
                    Call::ListSessions(_) => Op::ListSessions,
                    Call::CreateSession(..) => Op::CreateSession,
                    Call::ListMessages { .. } => Op::ListMessages,
                    Call::SendMessage { .. } => Op::SendMessage,
                };
                call_op == op
            })
            .count()
    }

    pub(crate) fn rename_session(&self, id: i64, title: &str) {
        let mut backend = self.backend.lock().unwrap();
        if let Some(s) = backend.sessions.iter_mut().find(|s| s.id == SessionId(id)) {
            s.title = title.to_string();
        }
    }
}

fn check(backend: &Backend, op: Op) -> Result<(), ApiError> {
    if backend.failing.contains(&op) {
        Err(ApiError::Status(500))
    } else {
        Ok(())
    }
}

#[async_trait]
impl ChatApi for FakeChatApi {
    async fn list_sessions(&self, user_id: UserId) -> Result<Vec<Session>, ApiError> {
        let mut backend = self.backend.lock().unwrap();
        backend.calls.push(Call::ListSessions(user_id));
        check(&backend, Op::ListSessions)?;
        Ok(backend.sessions.clone())
    }

    async fn create_session(&self, user_id: UserId, title: &str) -> Result<Session, ApiError> {
        let mut backend = self.backend.lock().unwrap();
        backend
            .calls
            .push(Call::CreateSession(user_id, title.to_string()));
        check(&backend, Op::CreateSession)?;

        let id = backend.sessions.iter().map(|s| s.id.0).max().unwrap_or(0) + 1;
        let created = session(id, title);
        backend.sessions.insert(0, created.clone());
        Ok(created)
    }

    async fn list_messages(
        &self,
        _user_id: UserId,
        session_id: SessionId,
        page: u32,
        limit: u32,
    ) -> Result<MessagePage, ApiError> {
        let mut backend = self.backend.lock().unwrap();
        backend.calls.push(Call::ListMessages {
            session_id,
            page,
            limit,
        });
        check(&backend, Op::ListMessages)?;

        let all = backend.messages.get(&session_id).cloned().unwrap_or_default();
        let start = (page as usize * limit as usize).min(all.len());
        let end = (start + limit as usize).min(all.len());
        Ok(MessagePage {
            messages: all[start..end].to_vec(),
            total: all.len() as u64,
        })
    }

    async fn send_message(
        &self,
        _user_id: UserId,
        session_id: SessionId,
        text: &str,
    ) -> Result<(), ApiError> {
        let mut backend = self.backend.lock().unwrap();
        backend.calls.push(Call::SendMessage {
            session_id,
            text: text.to_string(),
        });
        check(&backend, Op::SendMessage)?;

        backend.next_message_id += 1;
        let mut mine = record(backend.next_message_id, text);
        mine.sender = Sender::User;
        backend.next_message_id += 1;
        let reply = record(backend.next_message_id, "Tell me more.");
        backend
            .messages
            .entry(session_id)
            .or_default()
            .extend([mine, reply]);
        Ok(())
    }
}

//! Chat data model: sessions, messages and pages.

use chrono::{DateTime, Utc};
use counsel_common::{ClientId, SessionId};
use serde::{Deserialize, Serialize};

/// A named conversation thread. Never mutated client-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: SessionId,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Counselor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Sent,
    Delivered,
}

/// Identity of a message in the window.
///
/// Pending ids are local and are never matched against server ids;
/// reconciliation replaces the whole window instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageId {
    Pending(ClientId),
    Confirmed(i64),
}

impl MessageId {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    pub fn server_id(&self) -> Option<i64> {
        match self {
            Self::Confirmed(id) => Some(*id),
            Self::Pending(_) => None,
        }
    }

    pub fn client_id(&self) -> Option<ClientId> {
        match self {
            Self::Pending(id) => Some(*id),
            Self::Confirmed(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub text: String,
    pub sender: Sender,
    pub created_at: DateTime<Utc>,
    pub status: Option<DeliveryStatus>,
}

impl Message {
    /// Optimistic placeholder for text the user just sent.
    pub fn pending(client_id: ClientId, text: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: MessageId::Pending(client_id),
            text: text.into(),
            sender: Sender::User,
            created_at: now,
            status: Some(DeliveryStatus::Sent),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.id.is_pending()
    }
}

/// A message as the service encodes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRecord {
    pub id: i64,
    pub text: String,
    pub sender: Sender,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DeliveryStatus>,
}

impl From<MessageRecord> for Message {
    fn from(record: MessageRecord) -> Self {
        Self {
            id: MessageId::Confirmed(record.id),
            text: record.text,
            sender: record.sender,
            created_at: record.created_at,
            status: record.status,
        }
    }
}

/// One page of a session's history plus the session's total message count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePage {
    #[serde(default)]
    pub messages: Vec<MessageRecord>,
    #[serde(default)]
    pub total: u64,
}

//! Client-side chat core for counsel.
//!
//! Keeps a user's session list, the active session's message page and the
//! optimistic send pipeline in sync with a remote chat service:
//! - Session store with an active pointer
//! - Page window with whole-page replacement and `can_load_more`
//! - Optimistic sends reconciled by refetching the authoritative page
//! - Shared loading/error/typing indicators with fail-fast errors
//! - Stale completion discarding via per-request tickets
//!
//! [`ChatState`] is the pure state machine; [`Orchestrator`] runs its
//! requests against a [`ChatApi`] and feeds completions back one at a time.

pub mod composer;
pub mod http;
pub mod model;
pub mod orchestrator;
pub mod state;
pub mod status;
pub mod store;
pub mod window;

#[cfg(test)]
pub(crate) mod testing;

use async_trait::async_trait;
use counsel_common::{ApiError, SessionId, UserId};

pub use composer::{Composer, ComposerPhase, Outgoing, SendState};
pub use http::{HttpChatApi, HttpConfig};
pub use model::{DeliveryStatus, Message, MessageId, MessagePage, MessageRecord, Sender, Session};
pub use orchestrator::Orchestrator;
pub use state::{ChatState, Completion, PageTicket, Request, SendTicket};
pub use status::RequestStatus;
pub use store::SessionStore;
pub use window::MessageWindow;

/// The remote chat service.
///
/// Any non-success response is an error; failure bodies carry no detail
/// worth parsing.
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// `GET /sessions/{userId}`, most recent first.
    async fn list_sessions(&self, user_id: UserId) -> Result<Vec<Session>, ApiError>;

    /// `POST /sessions`.
    async fn create_session(&self, user_id: UserId, title: &str) -> Result<Session, ApiError>;

    /// `GET /messages/{userId}?sessionId&page&limit`, `page` is 0-based.
    async fn list_messages(
        &self,
        user_id: UserId,
        session_id: SessionId,
        page: u32,
        limit: u32,
    ) -> Result<MessagePage, ApiError>;

    /// `POST /messages`. The response body is not consumed.
    async fn send_message(
        &self,
        user_id: UserId,
        session_id: SessionId,
        text: &str,
    ) -> Result<(), ApiError>;
}

//! The page window: the loaded slice of the active session's history.

use counsel_common::{ClientId, SessionId};
use tracing::warn;

use crate::model::{DeliveryStatus, Message, MessageId, MessagePage};

/// Messages currently held for one session and page.
///
/// Server pages replace the window's confirmed entries wholesale. Pending
/// (optimistic) entries are appended locally and survive page loads until
/// the server has accepted their send; the next page after that
/// supersedes them.
#[derive(Debug)]
pub struct MessageWindow {
    session_id: Option<SessionId>,
    page_index: u32,
    page_size: u32,
    total: u64,
    messages: Vec<Message>,
    failed: bool,
}

impl MessageWindow {
    pub fn new(page_size: u32) -> Self {
        Self {
            session_id: None,
            page_index: 0,
            page_size: page_size.max(1),
            total: 0,
            messages: Vec::new(),
            failed: false,
        }
    }

    pub fn session_id(&self) -> Option<SessionId> {
        self.session_id
    }

    pub fn page_index(&self) -> u32 {
        self.page_index
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Whether the last page fetch for this window failed.
    pub fn is_failed(&self) -> bool {
        self.failed
    }

    pub fn confirmed_len(&self) -> usize {
        self.messages.iter().filter(|m| !m.is_pending()).count()
    }

    pub fn pending_len(&self) -> usize {
        self.messages.iter().filter(|m| m.is_pending()).count()
    }

    /// Upper bound on confirmed entries: `(page_index + 1) * page_size`.
    pub fn page_bound(&self) -> u64 {
        (u64::from(self.page_index) + 1) * u64::from(self.page_size)
    }

    pub fn can_load_more(&self) -> bool {
        self.page_bound() < self.total
    }

    /// Point the window at `session_id`, page 0, with nothing loaded.
    pub fn reset(&mut self, session_id: Option<SessionId>) {
        self.session_id = session_id;
        self.page_index = 0;
        self.total = 0;
        self.messages.clear();
        self.failed = false;
    }

    /// Move to the next page. Returns false (and changes nothing) when no
    /// more history is available.
    pub fn advance(&mut self) -> bool {
        if !self.can_load_more() {
            return false;
        }
        self.page_index += 1;
        true
    }

    /// Replace the confirmed entries with the page the server returned.
    /// Pending entries whose send was not accepted yet are kept after it.
    pub fn replace_page(&mut self, page: MessagePage) {
        let MessagePage { mut messages, total } = page;
        let limit = self.page_size as usize;
        if messages.len() > limit {
            warn!(
                received = messages.len(),
                page_size = limit,
                "page larger than requested, truncating"
            );
            messages.truncate(limit);
        }

        let unaccepted: Vec<Message> = self
            .messages
            .drain(..)
            .filter(|m| m.is_pending() && m.status != Some(DeliveryStatus::Delivered))
            .collect();
        self.messages = messages.into_iter().map(Message::from).collect();
        self.messages.extend(unaccepted);
        self.total = total;
        self.failed = false;
    }

    /// Drop all server data after a failed fetch. Pending entries stay.
    pub fn fail(&mut self) {
        self.messages.retain(Message::is_pending);
        self.total = 0;
        self.failed = true;
    }

    pub fn push_pending(&mut self, message: Message) {
        debug_assert!(message.is_pending());
        self.messages.push(message);
    }

    /// The server accepted this pending entry's send; the next page
    /// replaces it. Returns false if the entry is not held.
    pub fn mark_accepted(&mut self, client_id: ClientId) -> bool {
        match self
            .messages
            .iter_mut()
            .find(|m| m.id == MessageId::Pending(client_id))
        {
            Some(message) => {
                message.status = Some(DeliveryStatus::Delivered);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{page, record};
    use chrono::Utc;

    fn window_with_total(total: u64) -> MessageWindow {
        let mut window = MessageWindow::new(10);
        window.reset(Some(SessionId(1)));
        window.replace_page(page(0..10, total));
        window
    }

    #[test]
    fn new_window_is_empty() {
        let window = MessageWindow::new(10);
        assert_eq!(window.session_id(), None);
        assert_eq!(window.page_index(), 0);
        assert_eq!(window.total(), 0);
        assert!(window.messages().is_empty());
        assert!(!window.can_load_more());
    }

    #[test]
    fn zero_page_size_is_clamped() {
        let window = MessageWindow::new(0);
        assert_eq!(window.page_size(), 1);
    }

    #[test]
    fn can_load_more_matches_formula() {
        for total in 0..40u64 {
            for page_index in 0..5u32 {
                let mut window = MessageWindow::new(10);
                window.reset(Some(SessionId(1)));
                window.total = total;
                window.page_index = page_index;
                let expected = (u64::from(page_index) + 1) * 10 < total;
                assert_eq!(window.can_load_more(), expected, "total={total} page={page_index}");
            }
        }
    }

    #[test]
    fn paging_through_twenty_five_messages() {
        let mut window = window_with_total(25);
        assert!(window.can_load_more());

        assert!(window.advance());
        assert_eq!(window.page_index(), 1);
        assert!(window.can_load_more());

        assert!(window.advance());
        assert_eq!(window.page_index(), 2);
        assert!(!window.can_load_more());

        assert!(!window.advance());
        assert_eq!(window.page_index(), 2);
    }

    #[test]
    fn replace_page_replaces_rather_than_appends() {
        let mut window = window_with_total(25);
        window.replace_page(page(100..103, 25));
        let ids: Vec<_> = window.messages().iter().map(|m| m.id).collect();
        assert_eq!(
            ids,
            vec![
                MessageId::Confirmed(100),
                MessageId::Confirmed(101),
                MessageId::Confirmed(102)
            ]
        );
    }

    #[test]
    fn oversized_page_is_truncated_to_page_size() {
        let mut window = MessageWindow::new(10);
        window.reset(Some(SessionId(1)));
        window.replace_page(page(0..15, 15));
        assert_eq!(window.confirmed_len(), 10);
        assert!(window.confirmed_len() as u64 <= window.page_bound());
    }

    #[test]
    fn page_keeps_pending_entry_until_accepted() {
        let mut window = window_with_total(3);
        let client_id = ClientId::new();
        window.push_pending(Message::pending(client_id, "Hello", Utc::now()));

        window.replace_page(page(0..3, 3));
        assert_eq!(window.confirmed_len(), 3);
        assert_eq!(window.pending_len(), 1);
        assert_eq!(window.messages()[3].id, MessageId::Pending(client_id));
    }

    #[test]
    fn page_supersedes_accepted_pending_entry() {
        let mut window = window_with_total(3);
        let client_id = ClientId::new();
        window.push_pending(Message::pending(client_id, "Hello", Utc::now()));
        assert!(window.mark_accepted(client_id));

        window.replace_page(MessagePage {
            messages: vec![record(1, "Hello")],
            total: 4,
        });
        assert_eq!(window.pending_len(), 0);
        assert_eq!(window.total(), 4);
    }

    #[test]
    fn mark_accepted_unknown_entry() {
        let mut window = window_with_total(3);
        assert!(!window.mark_accepted(ClientId::new()));
    }

    #[test]
    fn failure_clears_server_data_but_keeps_pending() {
        let mut window = window_with_total(25);
        let client_id = ClientId::new();
        window.push_pending(Message::pending(client_id, "Hello", Utc::now()));

        window.fail();
        assert!(window.is_failed());
        assert_eq!(window.total(), 0);
        assert_eq!(window.messages().len(), 1);
        assert_eq!(window.messages()[0].id, MessageId::Pending(client_id));
    }

    #[test]
    fn failure_then_success_clears_failed_flag() {
        let mut window = window_with_total(25);
        window.fail();
        window.replace_page(page(0..2, 2));
        assert!(!window.is_failed());
    }

    #[test]
    fn reset_clears_everything() {
        let mut window = window_with_total(25);
        window.advance();
        window.push_pending(Message::pending(ClientId::new(), "x", Utc::now()));

        window.reset(Some(SessionId(2)));
        assert_eq!(window.session_id(), Some(SessionId(2)));
        assert_eq!(window.page_index(), 0);
        assert_eq!(window.total(), 0);
        assert!(window.messages().is_empty());
    }
}

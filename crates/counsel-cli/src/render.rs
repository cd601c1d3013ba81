//! Plain-text rendering of the chat state on stdout.

use counsel_chat::{ChatState, DeliveryStatus, Message, SendState, Sender, Session};
use counsel_common::ChatEvent;
use tokio::sync::broadcast::{self, error::TryRecvError};

/// Prints whatever changed since the last drain.
#[derive(Debug, Default)]
pub struct Renderer {
    typing: bool,
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Dirty {
    sessions: bool,
    window: bool,
    status: bool,
    errors: Vec<String>,
}

impl Dirty {
    fn note(&mut self, event: ChatEvent) {
        match event {
            ChatEvent::SessionsChanged | ChatEvent::ActiveSessionChanged(_) => self.sessions = true,
            ChatEvent::WindowChanged => self.window = true,
            ChatEvent::StatusChanged => self.status = true,
            ChatEvent::ErrorRaised(message) => self.errors.push(message),
        }
    }

    fn everything() -> Self {
        Self {
            sessions: true,
            window: true,
            status: true,
            errors: Vec::new(),
        }
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&mut self, events: &mut broadcast::Receiver<ChatEvent>, state: &ChatState) {
        let mut dirty = Dirty::default();
        loop {
            match events.try_recv() {
                Ok(event) => dirty.note(event),
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "renderer lagged, redrawing");
                    dirty = Dirty::everything();
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }

        // Half-loaded windows are skipped unless they show a fresh send.
        if dirty.window && (!state.loading() || state.typing()) {
            print_window(state);
        }
        if dirty.sessions && !state.loading() && state.active_session().is_none() {
            println!("No sessions yet. Use /new to start one.");
        }
        if dirty.status {
            self.update_typing(state.typing());
        }
        for message in dirty.errors {
            println!("! {message}");
        }
    }

    fn update_typing(&mut self, typing: bool) {
        if typing && !self.typing {
            println!("  counselor is typing...");
        }
        self.typing = typing;
    }
}

pub fn print_sessions(state: &ChatState) {
    if state.sessions().is_empty() {
        println!("No sessions yet. Use /new to start one.");
        return;
    }
    let active = state.active_session().map(|s| s.id);
    for (i, session) in state.sessions().iter().enumerate() {
        println!("{}", session_line(i + 1, session, active == Some(session.id)));
    }
}

pub fn print_window(state: &ChatState) {
    let Some(session) = state.active_session() else {
        return;
    };
    println!();
    println!("{}", window_header(session, state));
    for message in state.messages() {
        let sending = message
            .id
            .client_id()
            .and_then(|id| state.composer().state_of(id))
            == Some(SendState::Sending);
        println!("{}", message_line(message, sending));
    }
    if state.can_load_more() {
        println!("  (/more for older messages)");
    }
}

pub fn print_help() {
    println!("Type a message and press enter to send it.");
    println!("  /new [title]   start a session");
    println!("  /sessions      list sessions");
    println!("  /select <n>    switch to session n from /sessions");
    println!("  /more          load the next page of history");
    println!("  /reload        refetch sessions and messages");
    println!("  /help          show this help");
    println!("  /quit          exit");
}

fn session_line(position: usize, session: &Session, active: bool) -> String {
    let marker = if active { '*' } else { ' ' };
    format!(
        "{marker} {position:>2}. {} ({})",
        session.title,
        session.created_at.format("%Y-%m-%d")
    )
}

fn window_header(session: &Session, state: &ChatState) -> String {
    format!(
        "== {} == page {}, {} of {} messages",
        session.title,
        state.page_index() + 1,
        state.window().confirmed_len(),
        state.total()
    )
}

/// `sending` is whether the entry's send still awaits an answer.
fn message_line(message: &Message, sending: bool) -> String {
    let who = match message.sender {
        Sender::User => "you",
        Sender::Counselor => "counselor",
    };
    let status = match (message.is_pending(), message.status) {
        (true, _) if sending => " [sending]",
        (true, Some(DeliveryStatus::Delivered)) => " [delivered]",
        (true, _) => " [sent, not delivered]",
        (false, Some(DeliveryStatus::Delivered)) => " [delivered]",
        (false, Some(DeliveryStatus::Sent)) => " [sent]",
        (false, None) => "",
    };
    format!(
        "  {} {who}: {}{status}",
        message.created_at.format("%H:%M"),
        message.text
    )
}

use super::*;
use crate::model::{DeliveryStatus, MessageId, Sender};
use crate::testing::{session, Call, FakeChatApi, Op};

const USER: UserId = UserId(1234);

fn orchestrator(api: &Arc<FakeChatApi>) -> Orchestrator {
    let api: Arc<dyn ChatApi> = api.clone();
    Orchestrator::new(api, USER, 10)
}

fn seeded() -> Arc<FakeChatApi> {
    Arc::new(
        FakeChatApi::new()
            .with_sessions(vec![session(1, "Career"), session(2, "Resume")])
            .with_messages(1, 25)
            .with_messages(2, 3),
    )
}

#[tokio::test]
async fn step_is_idle_without_requests() {
    let api = seeded();
    let mut orch = orchestrator(&api);
    assert!(!orch.step().await);
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn startup_loads_sessions_then_first_page() {
    let api = seeded();
    let mut orch = orchestrator(&api);

    orch.load_sessions();
    assert!(orch.state().loading());
    orch.settle().await;

    let state = orch.state();
    assert!(!state.loading());
    assert_eq!(state.active_session().map(|s| s.title.as_str()), Some("Career"));
    assert_eq!(state.messages().len(), 10);
    assert_eq!(state.total(), 25);
    assert!(state.can_load_more());

    assert_eq!(
        api.calls(),
        vec![
            Call::ListSessions(USER),
            Call::ListMessages {
                session_id: SessionId(1),
                page: 0,
                limit: 10,
            },
        ]
    );
}

#[tokio::test]
async fn pages_through_history() {
    let api = seeded();
    let mut orch = orchestrator(&api);
    orch.load_sessions();
    orch.settle().await;

    assert!(orch.advance_page());
    orch.settle().await;
    assert_eq!(orch.state().page_index(), 1);
    assert_eq!(orch.state().messages()[0].id, MessageId::Confirmed(11));
    assert!(orch.state().can_load_more());

    assert!(orch.advance_page());
    orch.settle().await;
    assert_eq!(orch.state().messages().len(), 5);
    assert!(!orch.state().can_load_more());

    assert!(!orch.advance_page());
    assert_eq!(api.count(Op::ListMessages), 3);
}

#[tokio::test]
async fn switching_sessions_mid_fetch_shows_only_new_session() {
    let api = seeded();
    let mut orch = orchestrator(&api);
    orch.load_sessions();

    // Apply the listing; the first page fetch is now in flight.
    assert!(orch.step().await);
    assert!(orch.select_session(SessionId(2)));
    orch.settle().await;

    let state = orch.state();
    assert_eq!(state.active_session().map(|s| s.id), Some(SessionId(2)));
    assert_eq!(state.messages().len(), 3);
    assert_eq!(state.total(), 3);
    assert_eq!(api.count(Op::ListMessages), 2);
}

#[tokio::test]
async fn send_reconciles_with_server_page() {
    let api = Arc::new(
        FakeChatApi::new()
            .with_sessions(vec![session(1, "Career")])
            .with_messages(1, 2),
    );
    let mut orch = orchestrator(&api);
    orch.load_sessions();
    orch.settle().await;

    orch.set_input("Hello");
    assert!(orch.send());
    assert_eq!(orch.state().messages().len(), 3);
    assert!(orch.state().messages()[2].is_pending());
    assert!(orch.state().typing());

    orch.settle().await;
    let state = orch.state();
    assert!(!state.typing());
    assert_eq!(state.window().pending_len(), 0);
    assert_eq!(state.messages().len(), 4);
    assert_eq!(state.messages()[2].text, "Hello");
    assert_eq!(state.messages()[2].sender, Sender::User);
    assert_eq!(state.total(), 4);
    assert_eq!(state.error(), None);

    assert!(api.calls().contains(&Call::SendMessage {
        session_id: SessionId(1),
        text: "Hello".to_string(),
    }));
    assert_eq!(api.count(Op::ListSessions), 2);
}

#[tokio::test]
async fn failed_send_keeps_optimistic_message() {
    let api = Arc::new(FakeChatApi::new().with_sessions(vec![session(1, "Career")]));
    let mut orch = orchestrator(&api);
    orch.load_sessions();
    orch.settle().await;

    api.fail(Op::SendMessage);
    orch.set_input("Hello");
    assert!(orch.send());
    orch.settle().await;

    let state = orch.state();
    assert_eq!(state.messages().len(), 1);
    assert_eq!(state.messages()[0].text, "Hello");
    assert_eq!(state.messages()[0].status, Some(DeliveryStatus::Sent));
    assert_eq!(state.error(), Some("Failed to send message"));
    assert!(!state.loading());
    assert_eq!(api.count(Op::ListMessages), 1);
}

#[tokio::test]
async fn refused_send_makes_no_call() {
    let api = seeded();
    let mut orch = orchestrator(&api);

    orch.set_input("Hello");
    assert!(!orch.send());

    orch.load_sessions();
    orch.settle().await;
    orch.set_input("   ");
    assert!(!orch.send());
    assert_eq!(api.count(Op::SendMessage), 0);
}

#[tokio::test]
async fn create_session_activates_it() {
    let api = seeded();
    let mut orch = orchestrator(&api);
    orch.load_sessions();
    orch.settle().await;

    assert!(!orch.create_session(" "));
    assert!(orch.create_session("Interview prep"));
    orch.settle().await;

    let state = orch.state();
    assert_eq!(state.sessions()[0].title, "Interview prep");
    assert_eq!(state.active_session().map(|s| s.id), Some(SessionId(3)));
    assert!(state.messages().is_empty());
    assert!(api
        .calls()
        .contains(&Call::CreateSession(USER, "Interview prep".to_string())));
}

#[tokio::test]
async fn failed_fetch_recovers_on_reselect() {
    let api = seeded();
    api.fail(Op::ListMessages);
    let mut orch = orchestrator(&api);
    orch.load_sessions();
    orch.settle().await;
    assert_eq!(orch.state().error(), Some("Failed to fetch messages"));
    assert!(orch.state().messages().is_empty());

    api.succeed(Op::ListMessages);
    assert!(orch.select_session(SessionId(1)));
    orch.settle().await;
    assert_eq!(orch.state().error(), None);
    assert_eq!(orch.state().messages().len(), 10);
}

#[tokio::test]
async fn reload_picks_up_renamed_session() {
    let api = seeded();
    let mut orch = orchestrator(&api);
    orch.load_sessions();
    orch.settle().await;

    api.rename_session(1, "Career change");
    orch.reload();
    orch.settle().await;
    assert_eq!(
        orch.state().active_session().map(|s| s.title.as_str()),
        Some("Career change")
    );
}

#[tokio::test]
async fn session_list_failure_surfaces_error() {
    let api = seeded();
    api.fail(Op::ListSessions);
    let mut orch = orchestrator(&api);
    orch.load_sessions();
    orch.settle().await;

    assert_eq!(orch.state().error(), Some("Failed to fetch sessions"));
    assert!(orch.state().active_session().is_none());
    assert_eq!(api.count(Op::ListMessages), 0);
}

#[tokio::test]
async fn subscribers_see_state_changes() {
    let api = seeded();
    let mut orch = orchestrator(&api);
    let mut rx = orch.subscribe();

    orch.load_sessions();
    orch.settle().await;

    let mut seen = Vec::new();
    while let Ok(event) = rx.try_recv() {
        seen.push(event);
    }
    assert_eq!(seen.first(), Some(&ChatEvent::StatusChanged));
    assert!(seen.contains(&ChatEvent::SessionsChanged));
    assert!(seen.contains(&ChatEvent::ActiveSessionChanged(SessionId(1))));
    assert_eq!(seen.last(), Some(&ChatEvent::WindowChanged));
}

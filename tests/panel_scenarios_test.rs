mod common;

use common::{MockHttpClient, Reply};
use profile_drawer::conversation::{Conversation, User, other_user};
use profile_drawer::panel::{CONFIRMATION_TITLE, ProfilePanel};
use profile_drawer::projection::Avatar;
use profile_drawer::workflow::DeletionState;
use profile_drawer::{DeleteOutcome, EventBus, PresenceFeed};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::broadcast::error::TryRecvError;

fn direct_conversation() -> Conversation {
    serde_json::from_value(json!({
        "id": "direct-1",
        "name": null,
        "isGroup": false,
        "users": [
            { "id": "u1", "email": "me@example.com", "name": "Me" },
            {
                "id": "u2",
                "email": "bob@example.com",
                "name": "Bob",
                "image": "/images/bob.png",
                "createdAt": "2023-05-17T09:30:00.000Z"
            }
        ]
    }))
    .unwrap()
}

fn group_conversation() -> Conversation {
    serde_json::from_value(json!({
        "id": "group-1",
        "name": "Weekend trip",
        "isGroup": true,
        "users": [
            { "email": "dana@example.com" },
            { "email": "ann@example.com" },
            { "email": "carl@example.com" },
            { "email": "bea@example.com" }
        ]
    }))
    .unwrap()
}

fn direct_panel(presence: PresenceFeed, bus: Arc<EventBus>, reply: Reply) -> ProfilePanel {
    let conversation = direct_conversation();
    let counterpart = other_user(&conversation, "me@example.com").cloned();
    ProfilePanel::builder()
        .with_conversation(conversation)
        .with_counterpart(counterpart)
        .with_presence(presence)
        .with_http_client(MockHttpClient::replying(reply))
        .with_host(bus)
        .open(true)
        .build()
        .unwrap()
}

#[test]
fn scenario_a_counterpart_active() {
    let presence = PresenceFeed::new();
    presence.set(["bob@example.com", "zoe@example.com"]);
    let panel = direct_panel(presence, Arc::new(EventBus::new()), Reply::Status(200));

    let meta = panel.metadata();
    assert_eq!(meta.title, "Bob");
    assert_eq!(meta.status_text, "Active");
    assert_eq!(meta.email.as_deref(), Some("bob@example.com"));
    assert_eq!(meta.joined_date.as_deref(), Some("17 May 2023"));
    assert_eq!(meta.email_list, None);
}

#[test]
fn scenario_b_counterpart_offline() {
    let presence = PresenceFeed::new();
    presence.set(["me@example.com"]);
    let panel = direct_panel(presence, Arc::new(EventBus::new()), Reply::Status(200));

    assert_eq!(panel.metadata().status_text, "Offline");
}

#[test]
fn scenario_c_group_members_and_roster() {
    let presence = PresenceFeed::new();
    presence.set(["ann@example.com"]);
    let panel = ProfilePanel::builder()
        .with_conversation(group_conversation())
        .with_presence(presence)
        .with_http_client(MockHttpClient::replying(Reply::Status(200)))
        .with_host(Arc::new(EventBus::new()))
        .build()
        .unwrap();

    let meta = panel.metadata();
    assert_eq!(meta.title, "Weekend trip");
    assert_eq!(meta.status_text, "4 members");
    assert_eq!(
        meta.email_list.as_deref(),
        Some("dana@example.com, ann@example.com, carl@example.com, bea@example.com")
    );
    assert_eq!(meta.joined_date, None);
    assert!(matches!(meta.avatar, Avatar::Group(ref images) if images.len() == 3));
}

#[tokio::test]
async fn scenario_d_failed_delete_keeps_panel_usable() {
    let bus = Arc::new(EventBus::new());
    let mut notifications = bus.notification.subscribe();
    let mut closed = bus.panel_closed.subscribe();
    let mut navigation = bus.navigation.subscribe();
    let panel = direct_panel(PresenceFeed::new(), bus.clone(), Reply::Status(503));

    panel.open_confirmation().unwrap();
    let outcome = panel.confirm_delete().await;
    assert!(matches!(outcome, DeleteOutcome::Failed(_)));

    assert_eq!(
        notifications.try_recv().unwrap().message,
        "Something went wrong!"
    );
    assert!(matches!(notifications.try_recv(), Err(TryRecvError::Empty)));
    assert!(matches!(closed.try_recv(), Err(TryRecvError::Empty)));
    assert!(matches!(navigation.try_recv(), Err(TryRecvError::Empty)));

    assert_eq!(panel.deletion_state(), DeletionState::Idle);
    assert!(panel.is_open());
    assert!(panel.view().confirmation.is_none());
    panel.open_confirmation().unwrap();
    assert_eq!(
        panel.view().confirmation.map(|c| (c.title, c.actions_enabled)),
        Some((CONFIRMATION_TITLE, true))
    );
}

#[tokio::test]
async fn scenario_e_successful_delete_navigates_once() {
    let bus = Arc::new(EventBus::new());
    let mut closed = bus.panel_closed.subscribe();
    let mut navigation = bus.navigation.subscribe();
    let mut refresh = bus.listing_refresh.subscribe();
    let mut notifications = bus.notification.subscribe();
    let panel = direct_panel(PresenceFeed::new(), bus.clone(), Reply::Status(200));

    panel.open_confirmation().unwrap();
    assert!(panel.confirm_delete().await.is_deleted());

    assert!(closed.try_recv().is_ok());
    assert!(matches!(closed.try_recv(), Err(TryRecvError::Empty)));
    assert_eq!(navigation.try_recv().unwrap().path, "/conversations");
    assert!(matches!(navigation.try_recv(), Err(TryRecvError::Empty)));
    assert!(refresh.try_recv().is_ok());
    assert!(matches!(refresh.try_recv(), Err(TryRecvError::Empty)));
    assert!(matches!(notifications.try_recv(), Err(TryRecvError::Empty)));

    assert!(!panel.is_open());
    assert_eq!(panel.deletion_state(), DeletionState::Idle);
}

#[test]
fn presence_updates_flow_into_metadata() {
    let presence = PresenceFeed::new();
    let panel = direct_panel(presence.clone(), Arc::new(EventBus::new()), Reply::Status(200));
    assert_eq!(panel.metadata().status_text, "Offline");

    presence.add("bob@example.com");
    assert_eq!(panel.metadata().status_text, "Active");

    presence.remove("bob@example.com");
    assert_eq!(panel.metadata().status_text, "Offline");
}

#[test]
fn panels_share_one_presence_feed() {
    let presence = PresenceFeed::new();
    let first = direct_panel(presence.clone(), Arc::new(EventBus::new()), Reply::Status(200));
    let second = direct_panel(presence.clone(), Arc::new(EventBus::new()), Reply::Status(200));

    presence.set(["bob@example.com"]);
    assert_eq!(first.metadata().status_text, "Active");
    assert_eq!(second.metadata().status_text, "Active");
}

#[test]
fn dialog_toggles_do_not_recompute_metadata() {
    let presence = PresenceFeed::new();
    let panel = direct_panel(presence.clone(), Arc::new(EventBus::new()), Reply::Status(200));

    panel.view();
    let computed = panel.metadata_computations();

    panel.open_confirmation().unwrap();
    panel.view();
    panel.cancel_confirmation().unwrap();
    panel.view();
    panel.set_open(false);
    presence.add("someone-else@example.com");
    panel.view();

    assert_eq!(panel.metadata_computations(), computed);
}

#[test]
fn replacing_conversation_updates_title() {
    let panel = direct_panel(PresenceFeed::new(), Arc::new(EventBus::new()), Reply::Status(200));
    assert_eq!(panel.metadata().title, "Bob");

    let mut renamed = direct_conversation();
    renamed.name = Some("Bob & me".into());
    let counterpart = Some(User::new("bob@example.com").with_name("Bob"));
    panel.set_conversation(renamed, counterpart);

    assert_eq!(panel.metadata().title, "Bob & me");
    assert_eq!(panel.conversation_id(), "direct-1");
}

//! Gateway integration tests
//!
//! Drive the fully wired gateway through the dispatcher and router over
//! in-memory stores. No network, no database.
//!
//! Run with: cargo test -p integration-tests --test gateway_tests

use integration_tests::TestGateway;
use pulse_core::{CallStatus, Message, MessageId, UserId};
use pulse_gateway::events::ServerEvent;
use serde_json::json;

// ============================================================================
// Presence
// ============================================================================

#[tokio::test]
async fn test_online_set_follows_registration() {
    let gateway = TestGateway::new();

    let mut alice = gateway.connect(Some("alice")).await;
    assert_eq!(alice.recv_online().await, vec![UserId::new("alice")]);

    let mut bob = gateway.connect(Some("bob")).await;
    assert_eq!(
        alice.recv_online().await,
        vec![UserId::new("alice"), UserId::new("bob")]
    );
    assert_eq!(
        bob.recv_online().await,
        vec![UserId::new("alice"), UserId::new("bob")]
    );

    gateway.disconnect(&bob).await;
    assert_eq!(alice.recv_online().await, vec![UserId::new("alice")]);
    assert!(gateway
        .state
        .registry()
        .resolve(&UserId::new("bob"))
        .is_none());
}

#[tokio::test]
async fn test_user_online_while_any_device_remains() {
    let gateway = TestGateway::new();

    let mut phone = gateway.connect(Some("alice")).await;
    let laptop = gateway.connect(Some("alice")).await;
    phone.recv_online().await;
    assert_eq!(phone.recv_online().await, vec![UserId::new("alice")]);

    gateway.disconnect(&phone).await;
    assert_eq!(
        gateway.state.registry().snapshot(),
        vec![UserId::new("alice")]
    );

    gateway.disconnect(&laptop).await;
    assert!(gateway.state.registry().snapshot().is_empty());
    assert!(gateway
        .state
        .registry()
        .resolve(&UserId::new("alice"))
        .is_none());
}

// ============================================================================
// Call signaling
// ============================================================================

#[tokio::test]
async fn test_call_initiate_to_offline_user_records_missed_call() {
    let gateway = TestGateway::new();
    let mut alice = gateway.connect(Some("alice")).await;
    alice.recv_online().await;

    let frame = json!({
        "event": "callUser",
        "data": {
            "userToCall": "bob",
            "signalData": {"sdp": "offer-x"},
            "from": "alice",
            "name": "Alice"
        }
    })
    .to_string();
    gateway.send(&alice, &frame).await;
    tokio::task::yield_now().await;

    let records = gateway.calls.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status, CallStatus::Missed);
    assert_eq!(records[0].caller_id, UserId::new("alice"));
    assert_eq!(records[0].receiver_id, UserId::new("bob"));
    alice.assert_silent();
}

#[tokio::test]
async fn test_call_initiate_to_online_user_relays_without_record() {
    let gateway = TestGateway::new();
    let mut alice = gateway.connect(Some("alice")).await;
    let mut bob = gateway.connect(Some("bob")).await;
    alice.recv_online().await;
    alice.recv_online().await;
    bob.recv_online().await;

    let frame = json!({
        "event": "callUser",
        "data": {
            "userToCall": "bob",
            "signalData": {"sdp": "offer-x"},
            "from": "alice",
            "name": "Alice"
        }
    })
    .to_string();
    gateway.send(&alice, &frame).await;

    let ServerEvent::IncomingCall(payload) = bob.recv().await else {
        panic!("expected callUser");
    };
    assert_eq!(payload.signal, json!({"sdp": "offer-x"}));
    assert_eq!(payload.from, UserId::new("alice"));
    assert_eq!(payload.name, "Alice");
    assert!(gateway.calls.records().is_empty());
    bob.assert_silent();
}

#[tokio::test]
async fn test_full_call_exchange() {
    let gateway = TestGateway::new();
    let mut alice = gateway.connect(Some("alice")).await;
    let mut bob = gateway.connect(Some("bob")).await;
    alice.recv_online().await;
    alice.recv_online().await;
    bob.recv_online().await;

    let offer = json!({
        "event": "callUser",
        "data": {
            "userToCall": "bob",
            "signalData": {"sdp": "offer-x"},
            "from": "alice",
            "name": "Alice"
        }
    })
    .to_string();
    gateway.send(&alice, &offer).await;
    assert_eq!(bob.recv().await.name(), "callUser");

    let answer = json!({
        "event": "answerCall",
        "data": {"to": "alice", "signal": {"sdp": "answer-y"}}
    })
    .to_string();
    gateway.send(&bob, &answer).await;
    assert_eq!(
        alice.recv().await,
        ServerEvent::CallAccepted(json!({"sdp": "answer-y"}))
    );

    let candidate = json!({
        "event": "ice-candidate",
        "data": {"to": "bob", "candidate": {"candidate": "c0"}}
    })
    .to_string();
    gateway.send(&alice, &candidate).await;
    assert_eq!(
        bob.recv().await,
        ServerEvent::IceCandidate(json!({"candidate": "c0"}))
    );

    let end = json!({"event": "endCall", "data": {"to": "alice"}}).to_string();
    gateway.send(&bob, &end).await;
    assert_eq!(alice.recv().await, ServerEvent::CallEnded);
}

// ============================================================================
// Message fan-out
// ============================================================================

#[tokio::test]
async fn test_direct_message_persist_then_notify() {
    let gateway = TestGateway::new();
    let mut alice = gateway.connect(Some("alice")).await;
    let mut bob = gateway.connect(Some("bob")).await;
    alice.recv_online().await;
    alice.recv_online().await;
    bob.recv_online().await;

    let message = Message::direct(
        MessageId::new("m1"),
        UserId::new("alice"),
        UserId::new("bob"),
        "hello",
    );
    let persisted = gateway
        .state
        .messages()
        .create_message(message)
        .await
        .unwrap();
    gateway.state.fanout().message_created(&persisted).await;

    let ServerEvent::NewMessage(delivered) = bob.recv().await else {
        panic!("expected newMessage");
    };
    assert_eq!(delivered.id, MessageId::new("m1"));
    alice.assert_silent();
}

#[tokio::test]
async fn test_group_message_reaches_subscribed_members_including_sender() {
    let gateway = TestGateway::new();
    gateway.groups.insert("g1", &["alice", "bob", "carol"]);

    let mut alice = gateway.connect(Some("alice")).await;
    let mut bob = gateway.connect(Some("bob")).await;
    alice.recv_online().await;
    alice.recv_online().await;
    bob.recv_online().await;

    let join = r#"{"event":"joinGroup","data":"g1"}"#;
    gateway.send(&alice, join).await;
    gateway.send(&bob, join).await;

    let message = Message::group(
        MessageId::new("m2"),
        UserId::new("alice"),
        pulse_core::GroupId::new("g1"),
        "hi all",
    );
    gateway.state.fanout().message_created(&message).await;

    for client in [&mut alice, &mut bob] {
        let ServerEvent::NewGroupMessage(payload) = client.recv().await else {
            panic!("expected newGroupMessage");
        };
        assert_eq!(payload.message.id, MessageId::new("m2"));
    }
}

#[tokio::test]
async fn test_departed_connection_gets_no_group_delivery() {
    let gateway = TestGateway::new();
    gateway.groups.insert("g1", &["alice", "bob"]);

    let mut alice = gateway.connect(Some("alice")).await;
    let mut bob = gateway.connect(Some("bob")).await;
    alice.recv_online().await;
    alice.recv_online().await;
    bob.recv_online().await;

    gateway.send(&alice, r#"{"event":"joinGroup","data":"g1"}"#).await;
    gateway.send(&bob, r#"{"event":"joinGroup","data":"g1"}"#).await;
    gateway.send(&bob, r#"{"event":"leaveGroup","data":"g1"}"#).await;

    let message = Message::group(
        MessageId::new("m3"),
        UserId::new("alice"),
        pulse_core::GroupId::new("g1"),
        "anyone there?",
    );
    gateway.state.fanout().message_created(&message).await;

    assert_eq!(alice.recv().await.name(), "newGroupMessage");
    bob.assert_silent();
}

// ============================================================================
// Seen reconciliation
// ============================================================================

#[tokio::test]
async fn test_seen_batch_emits_single_event() {
    let gateway = TestGateway::new();
    let mut alice = gateway.connect(Some("alice")).await;
    let mut bob = gateway.connect(Some("bob")).await;
    alice.recv_online().await;
    alice.recv_online().await;
    bob.recv_online().await;

    for id in ["m1", "m2", "m3"] {
        gateway
            .state
            .messages()
            .create_message(Message::direct(
                MessageId::new(id),
                UserId::new("alice"),
                UserId::new("bob"),
                "msg",
            ))
            .await
            .unwrap();
    }

    let updated = gateway
        .state
        .messages()
        .mark_seen_batch(&UserId::new("alice"), &UserId::new("bob"))
        .await
        .unwrap();
    assert_eq!(updated, 3);

    gateway
        .state
        .fanout()
        .messages_seen(UserId::new("bob"), UserId::new("alice"))
        .await;

    let ServerEvent::MessagesSeen(payload) = alice.recv().await else {
        panic!("expected messagesSeen");
    };
    assert_eq!(payload.seen_by, UserId::new("bob"));
    assert_eq!(payload.sender_id, UserId::new("alice"));
    alice.assert_silent();
    bob.assert_silent();
}

// ============================================================================
// Frame handling
// ============================================================================

#[tokio::test]
async fn test_malformed_frames_do_not_disturb_the_session() {
    let gateway = TestGateway::new();
    let mut alice = gateway.connect(Some("alice")).await;
    let mut bob = gateway.connect(Some("bob")).await;
    alice.recv_online().await;
    alice.recv_online().await;
    bob.recv_online().await;

    gateway.send_expect_err(&alice, "{broken").await;
    gateway
        .send_expect_err(&alice, r#"{"event":"warpDrive","data":{}}"#)
        .await;

    // the connection still works afterwards
    gateway
        .send(&alice, r#"{"event":"typing","data":{"receiverId":"bob"}}"#)
        .await;
    let ServerEvent::Typing(notice) = bob.recv().await else {
        panic!("expected typing");
    };
    assert_eq!(notice.user_id, UserId::new("alice"));
}

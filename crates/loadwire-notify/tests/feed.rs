//! Frame routing and display rules.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use tokio::sync::mpsc;

use loadwire_notify::render::{truncate, FALLBACK_RATE, FALLBACK_SENDER, FALLBACK_SENDER_TYPE};
use loadwire_notify::{
    FeedOutcome, NotificationController, NotificationData, NotificationFeed, NotificationSink,
    NotificationState, NotifyConfig,
};

struct NullSink;

impl NotificationSink for NullSink {
    fn closed(&self) {}
    fn viewed(&self, _data: &NotificationData) {}
}

fn feed() -> NotificationFeed {
    let ctl = NotificationController::new(NotifyConfig::default(), Arc::new(NullSink)).unwrap();
    NotificationFeed::new(Arc::new(ctl))
}

fn frame(event: &str, data: Value) -> String {
    json!({ "v": 1, "event": event, "data": data }).to_string()
}

fn negotiation() -> Value {
    json!({
        "bidId": "b1",
        "loadId": "L1",
        "senderId": "u1",
        "senderName": "Ann",
        "sender": "shipper",
        "message": "counter at 500",
        "rate": 500,
        "timestamp": "2026-10-19T08:00:00.000Z",
        "senderAvatar": null,
        "negotiationData": null
    })
}

#[test]
fn truncation_boundaries() {
    let long = "x".repeat(150);
    let out = truncate(&long, 100);
    assert_eq!(out, format!("{}...", "x".repeat(100)));

    let short = "y".repeat(40);
    assert_eq!(truncate(&short, 100), short);

    let exact = "z".repeat(100);
    assert_eq!(truncate(&exact, 100), exact);
}

#[test]
fn missing_fields_render_fallback_labels() {
    let r = NotificationData::default().render(100);
    assert_eq!(r.sender, FALLBACK_SENDER);
    assert_eq!(r.sender_type, FALLBACK_SENDER_TYPE);
    assert_eq!(r.rate, FALLBACK_RATE);
    assert_eq!(r.body, "");
}

#[test]
fn lenient_payload_view() {
    let d: NotificationData = serde_json::from_value(json!({
        "bidId": 42,
        "senderName": "  ",
        "senderType": "inhouse",
        "rate": 1450.5,
        "message": ["not", "text"]
    }))
    .unwrap();
    let r = d.render(100);
    assert_eq!(r.bid_id.as_deref(), Some("42"));
    assert_eq!(r.sender, FALLBACK_SENDER);
    assert_eq!(r.sender_type, "inhouse");
    assert_eq!(r.rate, "1450.5");
    assert_eq!(r.body, "");
}

#[tokio::test(start_paused = true)]
async fn subscribed_alias_opens_and_siblings_dedupe() {
    let f = feed();

    let out = f.handle_text(&frame("new_negotiation_message", negotiation())).unwrap();
    assert_eq!(out, FeedOutcome::Opened);

    let r = f.controller().render().unwrap();
    assert_eq!(r.sender, "Ann");
    assert_eq!(r.sender_type, "shipper");
    assert_eq!(r.rate, "500");
    assert_eq!(r.body, "counter at 500");

    for alias in ["bid_negotiation_update", "negotiation_message"] {
        let out = f.handle_text(&frame(alias, negotiation())).unwrap();
        assert_eq!(out, FeedOutcome::Duplicate);
    }
}

#[tokio::test(start_paused = true)]
async fn other_events_and_null_payloads() {
    let f = feed();
    assert!(f.is_subscribed("negotiation_message"));
    assert!(!f.is_subscribed("new_bid"));

    let out = f.handle_text(&frame("new_bid", json!({"bidId": "b2"}))).unwrap();
    assert_eq!(out, FeedOutcome::Ignored);

    let out = f.handle_text(&frame("negotiation_message", Value::Null)).unwrap();
    assert_eq!(out, FeedOutcome::Suppressed);
    assert_eq!(f.controller().state(), NotificationState::Idle);

    let err = f.handle_text(&frame("negotiation_message", json!("text"))).unwrap_err();
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");

    assert!(f.handle_text("{broken").is_err());
}

#[tokio::test(start_paused = true)]
async fn custom_subscription_and_long_body() {
    let ctl = NotificationController::new(NotifyConfig::default(), Arc::new(NullSink)).unwrap();
    let f = NotificationFeed::with_subscriptions(Arc::new(ctl), ["bid_update"]);

    let mut payload = json!({ "bidId": "b3", "message": "m".repeat(150) });
    let out = f.handle_text(&frame("bid_update", payload.take())).unwrap();
    assert_eq!(out, FeedOutcome::Opened);

    let body = f.controller().render().unwrap().body;
    assert_eq!(body.chars().count(), 103);
    assert!(body.ends_with("..."));
}

#[tokio::test(start_paused = true)]
async fn pump_drains_until_closed() {
    let f = feed();
    let (tx, rx) = mpsc::channel(8);

    tx.send("garbage".to_string()).await.unwrap();
    tx.send(frame("negotiation_message", negotiation())).await.unwrap();
    drop(tx);

    f.pump(rx).await;
    assert_eq!(f.controller().state(), NotificationState::Visible);

    tokio::time::sleep(Duration::from_millis(5001)).await;
    assert_eq!(f.controller().state(), NotificationState::Idle);
}

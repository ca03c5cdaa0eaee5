//! Domain builders against a recording dispatcher.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use loadwire_core::protocol::EventPayload;
use loadwire_gateway::dispatch::EventDispatcher;
use loadwire_gateway::services::{BidInput, ChatInput, NegotiationInput, Notifier};

#[derive(Debug, Clone)]
struct Call {
    events: Vec<&'static str>,
    payload: Value,
    target: Option<String>,
}

#[derive(Default)]
struct RecordingDispatcher {
    calls: Mutex<Vec<Call>>,
}

impl RecordingDispatcher {
    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Expand recorded calls into (event, payload, target) deliveries.
    fn deliveries(&self) -> Vec<(&'static str, Value, Option<String>)> {
        self.calls()
            .into_iter()
            .flat_map(|c| {
                c.events
                    .into_iter()
                    .map(move |e| (e, c.payload.clone(), c.target.clone()))
            })
            .collect()
    }
}

impl EventDispatcher for RecordingDispatcher {
    fn dispatch(&self, event_names: &[&'static str], payload: &EventPayload, target: Option<&str>) {
        self.calls.lock().unwrap().push(Call {
            events: event_names.to_vec(),
            payload: serde_json::to_value(payload).unwrap(),
            target: target.map(str::to_string),
        });
    }
}

fn setup() -> (Arc<RecordingDispatcher>, Notifier) {
    let rec = Arc::new(RecordingDispatcher::default());
    let notifier = Notifier::new(rec.clone());
    (rec, notifier)
}

fn assert_stamped_between(payload: &Value, before: DateTime<Utc>, after: DateTime<Utc>) {
    let ts = payload["timestamp"].as_str().expect("timestamp string");
    let at = DateTime::parse_from_rfc3339(ts).unwrap().with_timezone(&Utc);
    // Millisecond precision on the wire.
    assert!(at >= before - chrono::Duration::milliseconds(1), "ts={ts}");
    assert!(at <= after, "ts={ts}");
}

#[test]
fn negotiation_scenario_fans_out_identical_payloads() {
    let (rec, notifier) = setup();
    let input: NegotiationInput = serde_json::from_value(json!({
        "bidId": "b1",
        "loadId": "L1",
        "senderId": "u1",
        "senderName": "Ann",
        "sender": "shipper",
        "message": "counter at 500",
        "rate": 500
    }))
    .unwrap();

    let before = Utc::now();
    notifier.negotiation_message(input).expect("attached");
    let after = Utc::now();

    let deliveries = rec.deliveries();
    let events: Vec<&str> = deliveries.iter().map(|(e, _, _)| *e).collect();
    assert_eq!(
        events,
        ["new_negotiation_message", "bid_negotiation_update", "negotiation_message"]
    );

    let first = &deliveries[0].1;
    for (event, payload, target) in &deliveries {
        assert_eq!(payload, first, "alias {event} diverged");
        assert!(target.is_none(), "negotiation must broadcast");
    }

    assert_stamped_between(first, before, after);
    let mut expected = json!({
        "bidId": "b1",
        "loadId": "L1",
        "senderId": "u1",
        "senderName": "Ann",
        "sender": "shipper",
        "message": "counter at 500",
        "rate": 500,
        "senderAvatar": null,
        "negotiationData": null
    });
    expected["timestamp"] = first["timestamp"].clone();
    assert_eq!(first, &expected);
}

#[test]
fn caller_timestamp_is_ignored() {
    let (rec, notifier) = setup();
    let input: NegotiationInput = serde_json::from_value(json!({
        "bidId": 7,
        "loadId": 9,
        "senderId": "u1",
        "senderName": "Ann",
        "sender": "inhouse",
        "message": "ok",
        "timestamp": "1999-01-01T00:00:00.000Z"
    }))
    .unwrap();

    notifier.negotiation_message(input).unwrap();
    let payload = &rec.calls()[0].payload;
    assert_ne!(payload["timestamp"], "1999-01-01T00:00:00.000Z");
    assert_eq!(payload["bidId"], "7");
    assert_eq!(payload["loadId"], "9");
    assert_eq!(payload["sender"], "inhouse");
    assert!(payload["rate"].is_null());
}

#[test]
fn bid_broadcasts_under_both_aliases_with_default_status() {
    let (rec, notifier) = setup();
    let input: BidInput = serde_json::from_value(json!({
        "bidId": "b2",
        "loadId": "L2",
        "senderId": "d1",
        "senderName": "Carrier Co",
        "driverName": "Bo",
        "message": "new bid",
        "rate": 1450.5
    }))
    .unwrap();

    notifier.bid_update(input).unwrap();

    let calls = rec.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].events, ["new_bid", "bid_update"]);
    assert!(calls[0].target.is_none());
    assert_eq!(calls[0].payload["status"], "pending");
    assert_eq!(calls[0].payload["driverName"], "Bo");
    assert_eq!(calls[0].payload["rate"], 1450.5);
}

#[test]
fn chat_is_addressed_to_receiver_only() {
    let (rec, notifier) = setup();
    let input: ChatInput = serde_json::from_value(json!({
        "senderId": "u1",
        "senderName": "Ann",
        "receiverId": "R",
        "message": "hello",
        "loadId": "L1"
    }))
    .unwrap();

    notifier.chat_message(input).unwrap();

    let calls = rec.calls();
    assert_eq!(calls[0].events, ["new_message", "receive_message", "chat_message"]);
    assert_eq!(calls[0].target.as_deref(), Some("R"));
    assert!(calls[0].payload.get("receiverId").is_none());
    assert!(calls[0].payload["avatarUrl"].is_null());
}

#[test]
fn missing_required_field_is_rejected_at_parse() {
    let res = serde_json::from_value::<ChatInput>(json!({
        "senderId": "u1",
        "senderName": "Ann",
        "message": "hello",
        "loadId": "L1"
    }));
    assert!(res.is_err());

    let res = serde_json::from_value::<BidInput>(json!({
        "bidId": {"nested": true},
        "loadId": "L2",
        "senderId": "d1",
        "senderName": "x",
        "message": "m"
    }));
    assert!(res.is_err());
}

#[test]
fn detached_notifier_skips_without_error() {
    let notifier = Notifier::detached();
    assert!(!notifier.is_attached());

    let input: BidInput = serde_json::from_value(json!({
        "bidId": "b", "loadId": "l", "senderId": "s", "senderName": "n", "message": "m"
    }))
    .unwrap();
    assert!(notifier.bid_update(input).is_none());
}

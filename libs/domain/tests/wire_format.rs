//! JSON field sets of the envelope records.

use std::collections::BTreeSet;

use herald_domain::{
    render, Command, CommandRecord, DomainError, DomainEvent, DomainEventRecord, EventMatcher,
    Tagged, INIT_AGGREGATE_ID,
};
use serde_json::{json, Value};

fn keys(value: &Value) -> BTreeSet<&str> {
    value
        .as_object()
        .expect("record should be a JSON object")
        .keys()
        .map(String::as_str)
        .collect()
}

#[test]
fn command_record_fields() {
    let cmd = Command::new("PlaceOrder", json!({"sku": "A-1"}));
    let value = serde_json::to_value(cmd.to_record()).unwrap();

    assert_eq!(
        keys(&value),
        BTreeSet::from(["tag", "id", "createdAt", "payload"])
    );
    assert_eq!(value["tag"], "PlaceOrder");
    assert_eq!(value["id"], cmd.id().to_string());
    assert_eq!(value["payload"], json!({"sku": "A-1"}));
}

#[test]
fn domain_event_record_fields() {
    let cmd = Command::new("Open", ());
    let event = DomainEvent::init_caused_by(&cmd, "Opened", json!({"owner": "ana"}));
    let value = serde_json::to_value(&event).unwrap();

    assert_eq!(
        keys(&value),
        BTreeSet::from(["tag", "id", "commandId", "aggregateId", "createdAt", "payload"])
    );
    assert_eq!(value["commandId"], cmd.id().to_string());
    assert_eq!(value["aggregateId"], INIT_AGGREGATE_ID);
}

#[test]
fn domain_error_record_fields() {
    let err = DomainError::new("Conflict", "stale version");
    let value = serde_json::to_value(&err).unwrap();

    assert_eq!(keys(&value), BTreeSet::from(["tag", "message", "createdAt"]));
    assert_eq!(value["message"], "stale version");
}

#[test]
fn created_at_is_iso_millis_utc() {
    let cmd = Command::new("T", ());
    let record = cmd.to_record();

    // 2024-05-01T12:00:00.123Z
    assert_eq!(record.created_at.len(), 24);
    assert!(record.created_at.ends_with('Z'));
    assert_eq!(
        render::parse_timestamp(&record.created_at).unwrap(),
        cmd.created_at()
    );
}

#[test]
fn records_from_another_producer_rehydrate() {
    let command_json = r#"{
        "tag": "Deposit",
        "id": "cmd_01HV4Z2WQXKJNM8GPQY6VBKC3D",
        "createdAt": "2024-05-01T12:00:00.123Z",
        "payload": {"amount": 5}
    }"#;
    let record: CommandRecord<Value> = serde_json::from_str(command_json).unwrap();
    let cmd = Command::try_from(record).unwrap();
    assert!(cmd.is("Deposit"));
    assert_eq!(cmd.id().to_string(), "cmd_01HV4Z2WQXKJNM8GPQY6VBKC3D");

    let event_json = json!({
        "tag": "Deposited",
        "id": "evt_01HV4Z3MXNKPQR9HSTZ7WCMD4E",
        "commandId": "cmd_01HV4Z2WQXKJNM8GPQY6VBKC3D",
        "aggregateId": "acct-9",
        "createdAt": "2024-05-01T12:00:00.200Z",
        "payload": {"amount": 5}
    });
    let record: DomainEventRecord<Value> = serde_json::from_value(event_json).unwrap();
    let event = DomainEvent::try_from(record).unwrap();
    assert_eq!(event.command_id(), cmd.id());
    assert_eq!(event.aggregate_id().as_str(), "acct-9");
    assert_eq!(
        event.to_string(),
        "2024-05-01T12:00:00.200Z :: cmd_01HV4Z2WQXKJNM8GPQY6VBKC3D :: acct-9 :: Deposited    \
         :: evt_01HV4Z3MXNKPQR9HSTZ7WCMD4E => {\"amount\":5}"
    );
}

#[test]
fn command_to_events_to_dispatch() {
    let open = Command::new("OpenAccount", json!({"owner": "ana"}));
    let events = vec![
        DomainEvent::init_caused_by(&open, "AccountOpened", json!({"balance": 0})),
        DomainEvent::caused_by(&open, "Deposited", "acct-1", json!({"amount": 10})),
        DomainEvent::caused_by(&open, "Deposited", "acct-1", json!({"amount": 5})),
        DomainEvent::caused_by(&open, "Audited", "acct-1", json!(null)),
    ];

    let matcher = EventMatcher::new()
        .on("AccountOpened", |_: &DomainEvent<Value>| 0)
        .on("Deposited", |e: &DomainEvent<Value>| {
            e.payload()["amount"].as_i64().unwrap_or_default()
        })
        .otherwise(|_| 0);

    let total: i64 = events
        .iter()
        .map(|e| matcher.dispatch(e).unwrap())
        .sum();
    assert_eq!(total, 15);

    let strict = EventMatcher::new().on("AccountOpened", |e: &DomainEvent<Value>| e.is_init());
    let err = strict.dispatch(&events[3]).unwrap_err();
    assert_eq!(err.unhandled_tag(), Some("Audited"));
    assert!(events.iter().all(|e| Tagged::tag(e) != "OpenAccount"));
}

#[test]
fn consumer_takes_ownership_of_payloads() {
    let line = r#"{"tag":"Deposit","id":"cmd_01HV4Z2WQXKJNM8GPQY6VBKC3D","createdAt":"2024-05-01T12:00:00.123Z","payload":{"amount":5,"memo":"rent"}}"#;
    let cmd: Command<Value> = serde_json::from_str(line).unwrap();

    let mut payload = cmd.into_payload();
    let memo = payload["memo"].take();
    assert_eq!(memo, "rent");
    assert_eq!(payload, json!({"amount": 5, "memo": null}));

    let cmd = Command::new("Deposit", vec![5_u32, 10]);
    let event = DomainEvent::caused_by(&cmd, "Deposited", "acct-1", cmd.payload().clone());
    let amounts = event.into_payload();
    assert_eq!(amounts.into_iter().sum::<u32>(), 15);
}

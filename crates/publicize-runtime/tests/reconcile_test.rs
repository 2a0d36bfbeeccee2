use publicize_runtime::{
    reconcile, Connection, ConnectionRequest, Outcome, RequestBatch,
};
use serde_json::json;

fn twitter_pair() -> Vec<Connection> {
    vec![
        Connection::new("A1", "twitter", "@first"),
        Connection::new("A2", "twitter", "@second").with_done(true),
    ]
}

#[test]
fn id_override_beats_service_wide_disable() {
    let requests = vec![
        ConnectionRequest::for_service("twitter", false),
        ConnectionRequest::for_connection("A1", true),
    ];

    let result = reconcile(&twitter_pair(), &requests);

    assert_eq!(result.get("A1"), Some(true));
    assert_eq!(result.get("A2"), Some(true));
    assert_eq!(result.len(), 2);
}

#[test]
fn id_override_wins_regardless_of_batch_order() {
    let connections = vec![
        Connection::new("A1", "twitter", "@first"),
        Connection::new("A2", "twitter", "@second"),
    ];
    let requests = vec![
        ConnectionRequest::for_connection("A1", true),
        ConnectionRequest::for_service("twitter", false),
    ];

    let result = reconcile(&connections, &requests);

    assert_eq!(result.get("A1"), Some(true));
    assert_eq!(result.get("A2"), Some(false));
}

#[test]
fn later_requests_in_the_same_scope_win() {
    let connections = vec![Connection::new("A1", "twitter", "@first")];
    let requests = vec![
        ConnectionRequest::for_service("twitter", false),
        ConnectionRequest::for_service("twitter", true),
        ConnectionRequest::for_connection("A1", false),
        ConnectionRequest::for_connection("A1", true),
        ConnectionRequest::for_connection("A1", false),
    ];

    let result = reconcile(&connections, &requests);

    assert_eq!(result.get("A1"), Some(false));
}

#[test]
fn item_with_both_selectors_applies_service_wide_then_id() {
    let connections = vec![
        Connection::new("A1", "twitter", "@first").with_enabled(false),
        Connection::new("A2", "twitter", "@second").with_enabled(false),
    ];
    let requests = vec![
        ConnectionRequest {
            service_name: Some("twitter".to_string()),
            id: Some("A1".into()),
            enabled: true,
        },
        ConnectionRequest::for_connection("A2", false),
    ];

    let result = reconcile(&connections, &requests);

    assert_eq!(result.get("A1"), Some(true));
    assert_eq!(result.get("A2"), Some(false));
}

#[test]
fn locked_connections_keep_their_value() {
    let connections = vec![
        Connection::new("D1", "facebook", "Done page").with_done(true),
        Connection::new("T1", "facebook", "Shared by admin").with_toggleable(false),
        Connection::new("F1", "facebook", "Mine"),
    ];

    let result = reconcile(
        &connections,
        &[ConnectionRequest::for_service("facebook", false)],
    );

    assert_eq!(result.get("D1"), Some(true));
    assert_eq!(result.get("T1"), Some(true));
    assert_eq!(result.get("F1"), Some(false));
    let locked: Vec<&str> = result.locked().map(|e| e.id.as_str()).collect();
    assert_eq!(locked, vec!["D1", "T1"]);
    let changed: Vec<&str> = result.changed().map(|e| e.id.as_str()).collect();
    assert_eq!(changed, vec!["F1"]);
}

#[test]
fn unknown_targets_are_ignored() {
    let connections = vec![Connection::new("A1", "twitter", "@first").with_enabled(false)];
    let requests = vec![
        ConnectionRequest::for_service("linkedin", true),
        ConnectionRequest::for_connection("missing", true),
    ];

    let result = reconcile(&connections, &requests);

    assert_eq!(result.get("A1"), Some(false));
    assert_eq!(result.changed().count(), 0);
    assert_eq!(result.get("missing"), None);
}

#[test]
fn malformed_items_do_not_change_anything() {
    let connections = twitter_pair();
    let batch = RequestBatch::from_value(&json!([
        { "enabled": false },
        { "service_name": "twitter" },
        { "id": "A1", "enabled": null },
        42
    ]));

    let result = reconcile(&connections, &batch.items);

    assert_eq!(batch.ignored, 4);
    assert!(result.iter().all(|entry| entry.outcome == Outcome::Unchanged));
    assert!(result.iter().all(|entry| entry.enabled == entry.previous));
}

#[test]
fn untargeted_connections_keep_their_value() {
    let connections = vec![
        Connection::new("A1", "twitter", "@first").with_enabled(false),
        Connection::new("B1", "tumblr", "blog"),
    ];

    let result = reconcile(&connections, &[ConnectionRequest::for_connection("B1", false)]);

    let entries: Vec<(&str, bool)> = result
        .iter()
        .map(|entry| (entry.id.as_str(), entry.enabled))
        .collect();
    assert_eq!(entries, vec![("A1", false), ("B1", false)]);
}

#[test]
fn duplicate_ids_collapse_to_the_last_record() {
    let connections = vec![
        Connection::new("A1", "twitter", "@old").with_toggleable(false),
        Connection::new("B1", "tumblr", "blog"),
        Connection::new("A1", "twitter", "@new"),
    ];

    let result = reconcile(&connections, &[ConnectionRequest::for_connection("A1", false)]);

    let ids: Vec<&str> = result.iter().map(|entry| entry.id.as_str()).collect();
    assert_eq!(ids, vec!["A1", "B1"]);
    assert_eq!(result.get("A1"), Some(false));
}

#[test]
fn empty_snapshot_yields_empty_result() {
    let result = reconcile(&[], &[ConnectionRequest::for_service("twitter", true)]);

    assert!(result.is_empty());
}

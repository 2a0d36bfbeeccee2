use publicize_runtime::{
    Connection, ConnectionId, ConnectionReader, Error, FieldContext, MemoryConnectionStore,
    PostConnectionsField, PostId, Result, SkipAction, SkipWriter, PERMISSION_ERROR_CODE,
};
use serde_json::json;
use std::cell::Cell;

const POST: PostId = 42;

fn seeded_store() -> MemoryConnectionStore {
    MemoryConnectionStore::new().with_connections(
        POST,
        vec![
            Connection::new("A1", "twitter", "@first")
                .with_extra("access_token", json!("do-not-leak")),
            Connection::new("A2", "twitter", "@second").with_done(true),
            Connection::new(7u64, "facebook", "Page").with_enabled(false),
        ],
    )
}

#[test]
fn get_projects_snapshot_without_internal_fields() {
    let store = seeded_store();
    let field = PostConnectionsField::new(&store, &store, &store);

    let connections = field.get(POST, FieldContext::Edit).unwrap();
    let value = serde_json::to_value(&connections).unwrap();

    assert_eq!(value[2]["id"], json!("7"));
    assert_eq!(value[2]["enabled"], json!(false));
    assert!(value[0].get("access_token").is_none());
    assert_eq!(field.schema()["type"], json!("array"));
}

#[test]
fn update_applies_precedence_and_guard() {
    let store = seeded_store();
    let field = PostConnectionsField::new(&store, &store, &store);

    let report = field
        .update(
            POST,
            &json!([
                { "service_name": "twitter", "enabled": false },
                { "id": "A1", "enabled": true },
                { "id": 7, "enabled": true },
                { "bogus": true }
            ]),
        )
        .unwrap();

    assert_eq!(report.connections.get("A1"), Some(true));
    assert_eq!(report.connections.get("A2"), Some(true));
    assert_eq!(report.connections.get("7"), Some(true));
    assert_eq!(report.ignored, 1);
    assert_eq!(report.changed_count(), 1);
    assert!(store.skipped(POST).is_empty());
}

#[test]
fn every_connection_is_resynced() {
    let store = seeded_store();
    let field = PostConnectionsField::new(&store, &store, &store);

    let report = field.update(POST, &json!([{ "id": "A1", "enabled": false }])).unwrap();

    assert_eq!(
        report.writes,
        vec![
            SkipAction::Set(ConnectionId::from("A1")),
            SkipAction::Clear(ConnectionId::from("A2")),
            SkipAction::Set(ConnectionId::from("7")),
        ]
    );
    assert_eq!(store.write_count(), 3);
    assert!(store.is_skipped(POST, "A1"));
    assert!(!store.is_skipped(POST, "A2"));
    assert!(store.is_skipped(POST, "7"));
}

#[test]
fn repeated_update_is_idempotent() {
    let store = seeded_store();
    let field = PostConnectionsField::new(&store, &store, &store);
    let request = json!([
        { "service_name": "twitter", "enabled": false },
        { "id": "7", "enabled": true }
    ]);

    field.update(POST, &request).unwrap();
    let after_first = field.get(POST, FieldContext::Edit).unwrap();
    let second = field.update(POST, &request).unwrap();
    let after_second = field.get(POST, FieldContext::Edit).unwrap();

    assert_eq!(after_first, after_second);
    assert_eq!(second.changed_count(), 0);
    assert_eq!(second.writes.len(), 3);
}

#[test]
fn denied_post_is_rejected_before_any_write() {
    let store = seeded_store().deny(POST);
    let field = PostConnectionsField::new(&store, &store, &store);

    let err = field
        .update(POST, &json!([{ "service_name": "twitter", "enabled": false }]))
        .expect_err("access should be denied");

    match err {
        Error::PermissionDenied { post_id, code, status } => {
            assert_eq!(post_id, POST);
            assert_eq!(code, PERMISSION_ERROR_CODE);
            assert_eq!(status, 403);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(store.write_count(), 0);
    assert!(field.get(POST, FieldContext::View).is_err());
}

#[test]
fn anonymous_actor_gets_unauthorized_status() {
    let store = seeded_store().deny(POST).with_authenticated(false);
    let field = PostConnectionsField::new(&store, &store, &store);

    let err = field.get(POST, FieldContext::Edit).expect_err("access should be denied");

    assert_eq!(err.status(), 401);
}

struct CountingReader<'a> {
    inner: &'a MemoryConnectionStore,
    reads: Cell<usize>,
}

impl ConnectionReader for CountingReader<'_> {
    fn list_connections(&self, post_id: PostId) -> Result<Vec<Connection>> {
        self.reads.set(self.reads.get() + 1);
        self.inner.list_connections(post_id)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("disk full")]
struct DiskFull;

struct FailingWriter;

impl SkipWriter for FailingWriter {
    fn set_skip(&self, _post_id: PostId, _connection_id: &ConnectionId) -> Result<()> {
        Err(Error::storage(DiskFull))
    }

    fn clear_skip(&self, _post_id: PostId, _connection_id: &ConnectionId) -> Result<()> {
        Ok(())
    }
}

#[test]
fn denied_post_is_never_read() {
    let store = seeded_store().deny(POST);
    let reader = CountingReader {
        inner: &store,
        reads: Cell::new(0),
    };
    let field = PostConnectionsField::new(reader, &store, &store);

    assert!(field.get(POST, FieldContext::Edit).is_err());
    assert!(field.update(POST, &json!([])).is_err());
    assert_eq!(field.reader().reads.get(), 0);
}

#[test]
fn writer_failure_propagates() {
    let store = seeded_store();
    let field = PostConnectionsField::new(&store, FailingWriter, &store);

    let err = field
        .update(POST, &json!([{ "id": "A1", "enabled": false }]))
        .expect_err("writer failure should surface");

    assert!(matches!(err, Error::Storage(_)));
    assert_eq!(err.status(), 500);
}

use crate::boundary::{ConnectionReader, PermissionGate, SkipWriter};
use crate::reconcile::{reconcile, Reconciliation};
use crate::skip::{sync_skip_records, SkipAction};
use crate::{Error, Result};
use log::{debug, info, warn};
use publicize_format::{
    post_connections_schema, ConnectionRequest, FieldContext, PostConnection, PostId,
    RequestBatch,
};
use serde::Serialize;
use serde_json::Value;

/// Summary of one update of a post's connections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateReport {
    /// Post that was updated.
    pub post_id: PostId,
    /// Final share intent per connection.
    pub connections: Reconciliation,
    /// Skip-record writes that were issued.
    pub writes: Vec<SkipAction>,
    /// Request items dropped as malformed.
    pub ignored: usize,
}

impl UpdateReport {
    /// Number of connections whose share intent flipped.
    pub fn changed_count(&self) -> usize {
        self.connections.changed().count()
    }
}

/// The per-post connections field of the posts REST resource.
///
/// Reads are projected through [`PostConnection`]; writes are reconciled
/// against the current snapshot and then every skip record is resynced.
#[derive(Debug, Clone)]
pub struct PostConnectionsField<R, W, G> {
    reader: R,
    writer: W,
    gate: G,
}

impl<R, W, G> PostConnectionsField<R, W, G>
where
    R: ConnectionReader,
    W: SkipWriter,
    G: PermissionGate,
{
    /// Create a field backed by the given collaborators.
    pub fn new(reader: R, writer: W, gate: G) -> Self {
        Self {
            reader,
            writer,
            gate,
        }
    }

    /// JSON schema of the field.
    pub fn schema(&self) -> Value {
        post_connections_schema()
    }

    /// Reject the request unless the actor may access the post's connections.
    pub fn verify_permissions(&self, post_id: PostId) -> Result<()> {
        if self.gate.can_access_connections(post_id) {
            return Ok(());
        }

        warn!("Connection access denied for post {}", post_id);
        Err(Error::permission_denied(
            post_id,
            self.gate.actor_is_authenticated(),
        ))
    }

    /// Current connections of a post as exposed to API consumers.
    pub fn get(&self, post_id: PostId, context: FieldContext) -> Result<Vec<PostConnection>> {
        self.verify_permissions(post_id)?;

        let connections = self.reader.list_connections(post_id)?;
        Ok(PostConnection::project_all(&connections, context))
    }

    /// Apply a raw write value, dropping malformed items.
    pub fn update(&self, post_id: PostId, value: &Value) -> Result<UpdateReport> {
        self.verify_permissions(post_id)?;

        let batch = RequestBatch::from_value(value);
        if batch.ignored > 0 {
            debug!(
                "Ignoring {} malformed connection requests for post {}",
                batch.ignored, post_id
            );
        }

        let mut report = self.reconcile_and_sync(post_id, &batch.items)?;
        report.ignored = batch.ignored;
        Ok(report)
    }

    /// Reconcile typed requests and resync the post's skip records.
    pub fn apply(&self, post_id: PostId, requests: &[ConnectionRequest]) -> Result<UpdateReport> {
        self.verify_permissions(post_id)?;
        self.reconcile_and_sync(post_id, requests)
    }

    fn reconcile_and_sync(
        &self,
        post_id: PostId,
        requests: &[ConnectionRequest],
    ) -> Result<UpdateReport> {
        let available = self.reader.list_connections(post_id)?;
        let connections = reconcile(&available, requests);

        for entry in connections.locked() {
            debug!(
                "Connection {} is locked for post {}; keeping enabled={}",
                entry.id, post_id, entry.enabled
            );
        }

        let writes = sync_skip_records(post_id, &connections, &self.writer)?;

        let report = UpdateReport {
            post_id,
            connections,
            writes,
            ignored: 0,
        };
        info!(
            "Updated connections for post {}: {} changed, {} total",
            post_id,
            report.changed_count(),
            report.connections.len()
        );

        Ok(report)
    }

    /// The connection reader.
    pub fn reader(&self) -> &R {
        &self.reader
    }

    /// The skip-record writer.
    pub fn writer(&self) -> &W {
        &self.writer
    }
}

//! Collaborators the host application supplies.

use crate::Result;
use publicize_format::{Connection, ConnectionId, PostId};
use std::sync::Arc;

/// Produces the current connections for a post.
pub trait ConnectionReader {
    /// Snapshot of every connection available to the post.
    ///
    /// The snapshot must stay stable for the duration of one update.
    fn list_connections(&self, post_id: PostId) -> Result<Vec<Connection>>;
}

/// Persists whether a connection is skipped for a post.
///
/// Both operations must be idempotent.
pub trait SkipWriter {
    /// Record that the post must not be shared to the connection.
    fn set_skip(&self, post_id: PostId, connection_id: &ConnectionId) -> Result<()>;

    /// Remove any skip record for the connection.
    fn clear_skip(&self, post_id: PostId, connection_id: &ConnectionId) -> Result<()>;
}

/// Capability check consulted before any read or write.
pub trait PermissionGate {
    /// Whether the current actor may read and change the post's connections.
    fn can_access_connections(&self, post_id: PostId) -> bool;

    /// Whether the current actor is logged in at all.
    fn actor_is_authenticated(&self) -> bool {
        true
    }
}

impl<T: ConnectionReader + ?Sized> ConnectionReader for &T {
    fn list_connections(&self, post_id: PostId) -> Result<Vec<Connection>> {
        (**self).list_connections(post_id)
    }
}

impl<T: SkipWriter + ?Sized> SkipWriter for &T {
    fn set_skip(&self, post_id: PostId, connection_id: &ConnectionId) -> Result<()> {
        (**self).set_skip(post_id, connection_id)
    }

    fn clear_skip(&self, post_id: PostId, connection_id: &ConnectionId) -> Result<()> {
        (**self).clear_skip(post_id, connection_id)
    }
}

impl<T: PermissionGate + ?Sized> PermissionGate for &T {
    fn can_access_connections(&self, post_id: PostId) -> bool {
        (**self).can_access_connections(post_id)
    }

    fn actor_is_authenticated(&self) -> bool {
        (**self).actor_is_authenticated()
    }
}

impl<T: ConnectionReader + ?Sized> ConnectionReader for Arc<T> {
    fn list_connections(&self, post_id: PostId) -> Result<Vec<Connection>> {
        (**self).list_connections(post_id)
    }
}

impl<T: SkipWriter + ?Sized> SkipWriter for Arc<T> {
    fn set_skip(&self, post_id: PostId, connection_id: &ConnectionId) -> Result<()> {
        (**self).set_skip(post_id, connection_id)
    }

    fn clear_skip(&self, post_id: PostId, connection_id: &ConnectionId) -> Result<()> {
        (**self).clear_skip(post_id, connection_id)
    }
}

impl<T: PermissionGate + ?Sized> PermissionGate for Arc<T> {
    fn can_access_connections(&self, post_id: PostId) -> bool {
        (**self).can_access_connections(post_id)
    }

    fn actor_is_authenticated(&self) -> bool {
        (**self).actor_is_authenticated()
    }
}

/// Gate that grants access to every post.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl PermissionGate for AllowAll {
    fn can_access_connections(&self, _post_id: PostId) -> bool {
        true
    }
}

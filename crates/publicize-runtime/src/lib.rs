//! # publicize-runtime
//!
//! Share-state reconciliation for per-post Publicize connections.
//!
//! This crate provides:
//! - Reader, writer and permission-gate traits the host implements
//! - The reconciler that merges share-toggle requests into a snapshot
//! - Skip-record resync driven by the reconciled state
//! - `PostConnectionsField`, the REST field controller tying them together
//!
//! ## Example
//!
//! ```ignore
//! use publicize_runtime::{MemoryConnectionStore, PostConnectionsField};
//! use publicize_format::FieldContext;
//! use serde_json::json;
//!
//! let store = MemoryConnectionStore::new().with_connections(42, connections);
//! let field = PostConnectionsField::new(&store, &store, &store);
//!
//! field.update(42, &json!([{ "service_name": "twitter", "enabled": false }]))?;
//! let exposed = field.get(42, FieldContext::Edit)?;
//! ```

mod boundary;
mod error;
mod field;
mod memory;
mod reconcile;
mod skip;

pub use boundary::{AllowAll, ConnectionReader, PermissionGate, SkipWriter};
pub use error::{Error, Result, PERMISSION_ERROR_CODE};
pub use field::{PostConnectionsField, UpdateReport};
pub use memory::MemoryConnectionStore;
pub use reconcile::{reconcile, Outcome, ReconciledConnection, Reconciliation};
pub use skip::{sync_skip_records, SkipAction};

// Re-export publicize-format types for convenience
pub use publicize_format::{
    Connection, ConnectionId, ConnectionRequest, FieldContext, PostConnection, PostId,
    RequestBatch,
};

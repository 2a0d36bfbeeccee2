//! # publicize-format
//!
//! Data model for per-post Publicize connections.
//!
//! This crate provides:
//! - `Connection` records with normalized string identifiers
//! - Lenient parsing of share-toggle requests
//! - The allow-listed REST projection of a connection
//! - The JSON schema of the connections field
//!
//! ## Example
//!
//! ```ignore
//! use publicize_format::{Connection, FieldContext, PostConnection, RequestBatch};
//!
//! let connections = Connection::list_from_json(br#"[...]"#)?;
//! let exposed = PostConnection::project_all(&connections, FieldContext::Edit);
//!
//! let batch = RequestBatch::from_slice(br#"[{"service_name":"twitter","enabled":false}]"#)?;
//! assert_eq!(batch.items.len(), 1);
//! ```

mod connection;
mod error;
mod projection;
mod request;
mod schema;

pub use connection::{Connection, ConnectionId};
pub use error::{Error, Result};
pub use projection::{FieldContext, PostConnection};
pub use request::{ConnectionRequest, RequestBatch};
pub use schema::{post_connection_schema, post_connections_schema, FIELD_NAME, VISIBLE_PROPERTIES};

/// Identifier of a post.
pub type PostId = u64;

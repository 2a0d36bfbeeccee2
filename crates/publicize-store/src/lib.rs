//! # publicize-store
//!
//! File-backed storage for per-post Publicize connections.
//!
//! This crate provides:
//! - `FileConnectionStore`, a TOML document acting as connection reader,
//!   skip-record writer and permission gate
//! - `StoreConfig` for the skip-record key prefix and supported post types
//! - The `publicize-field` CLI (with the `cli` feature)
//!
//! ## Example
//!
//! ```ignore
//! use publicize_runtime::PostConnectionsField;
//! use publicize_store::{FileConnectionStore, StoreConfig};
//! use serde_json::json;
//!
//! let store = FileConnectionStore::open("connections.toml", StoreConfig::default())?;
//! let field = PostConnectionsField::new(&store, &store, &store);
//! field.update(42, &json!([{ "service_name": "twitter", "enabled": false }]))?;
//! ```

mod config;
mod error;
mod store;

pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use store::{ActorRecord, ConnectionRecord, FileConnectionStore, PostRecord, StoreDocument};

mod document;
mod file_store;

pub use document::{ActorRecord, ConnectionRecord, PostRecord, StoreDocument};
pub use file_store::FileConnectionStore;

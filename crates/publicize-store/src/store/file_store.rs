use super::document::{PostRecord, StoreDocument};
use crate::{StoreConfig, StoreError, StoreResult};
use log::{debug, info};
use publicize_format::{Connection, ConnectionId, PostId};
use publicize_runtime::{ConnectionReader, PermissionGate, SkipWriter};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tempfile::NamedTempFile;

const SKIP_MARKER: &str = "1";

/// Connection store persisted as a TOML document.
///
/// One instance acts as reader, writer and permission gate. Writes are
/// flushed to disk immediately, and only when they change something.
#[derive(Debug)]
pub struct FileConnectionStore {
    path: PathBuf,
    config: StoreConfig,
    document: Mutex<StoreDocument>,
}

impl FileConnectionStore {
    /// Open an existing store file.
    pub fn open<P: Into<PathBuf>>(path: P, config: StoreConfig) -> StoreResult<Self> {
        let path = path.into();
        let document = read_document(&path)?;
        info!(
            "Opened connection store {} ({} connections, {} posts)",
            path.display(),
            document.connections.len(),
            document.posts.len()
        );

        Ok(Self {
            path,
            config,
            document: Mutex::new(document),
        })
    }

    /// Create a store file holding the given document, replacing any existing one.
    pub fn create<P: Into<PathBuf>>(
        path: P,
        config: StoreConfig,
        document: StoreDocument,
    ) -> StoreResult<Self> {
        let path = path.into();
        write_document(&path, &document)?;

        Ok(Self {
            path,
            config,
            document: Mutex::new(document),
        })
    }

    /// Re-read the file, discarding the in-memory copy.
    pub fn reload(&self) -> StoreResult<()> {
        let document = read_document(&self.path)?;
        *self.lock() = document;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Copy of the current document.
    pub fn document(&self) -> StoreDocument {
        self.lock().clone()
    }

    /// Connections with a skip record on the post, in key order.
    pub fn skip_records(&self, post_id: PostId) -> StoreResult<Vec<ConnectionId>> {
        let document = self.lock();
        let post = document
            .post(post_id)
            .ok_or(StoreError::UnknownPost(post_id))?;

        Ok(post
            .meta
            .keys()
            .filter(|key| post.has_meta_flag(key))
            .filter_map(|key| self.config.connection_for_key(key))
            .collect())
    }

    fn snapshot(&self, post_id: PostId) -> StoreResult<Vec<Connection>> {
        let document = self.lock();
        let Some(post) = document.post(post_id) else {
            debug!("No post {} in store; empty connection snapshot", post_id);
            return Ok(Vec::new());
        };

        document
            .connections
            .iter()
            .map(|record| {
                let skipped = post.has_meta_flag(&self.config.skip_key(&record.unique_id));
                let done = post.done.contains(&record.unique_id);
                record
                    .to_connection(!skipped, done)
                    .map_err(|e| StoreError::InvalidDocument(e.to_string()))
            })
            .collect()
    }

    /// Apply `change` to a post's record, persisting only if it reports a change.
    fn update_post<F>(&self, post_id: PostId, change: F) -> StoreResult<()>
    where
        F: FnOnce(&mut PostRecord) -> bool,
    {
        let mut document = self.lock();
        let post = document
            .post_mut(post_id)
            .ok_or(StoreError::UnknownPost(post_id))?;

        if !change(post) {
            return Ok(());
        }

        write_document(&self.path, &document)
    }

    fn lock(&self) -> MutexGuard<'_, StoreDocument> {
        self.document
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ConnectionReader for FileConnectionStore {
    fn list_connections(&self, post_id: PostId) -> publicize_runtime::Result<Vec<Connection>> {
        Ok(self.snapshot(post_id)?)
    }
}

impl SkipWriter for FileConnectionStore {
    fn set_skip(
        &self,
        post_id: PostId,
        connection_id: &ConnectionId,
    ) -> publicize_runtime::Result<()> {
        let key = self.config.skip_key(connection_id);
        self.update_post(post_id, |post| {
            if post.meta.get(&key).map(String::as_str) == Some(SKIP_MARKER) {
                return false;
            }
            post.meta.insert(key, SKIP_MARKER.to_string());
            true
        })?;
        Ok(())
    }

    fn clear_skip(
        &self,
        post_id: PostId,
        connection_id: &ConnectionId,
    ) -> publicize_runtime::Result<()> {
        let key = self.config.skip_key(connection_id);
        self.update_post(post_id, |post| post.meta.remove(&key).is_some())?;
        Ok(())
    }
}

impl PermissionGate for FileConnectionStore {
    fn can_access_connections(&self, post_id: PostId) -> bool {
        let document = self.lock();
        document.post(post_id).is_some_and(|post| {
            post.editable && self.config.supports_post_type(&post.post_type)
        })
    }

    fn actor_is_authenticated(&self) -> bool {
        self.lock().actor.authenticated
    }
}

fn read_document(path: &Path) -> StoreResult<StoreDocument> {
    let text = fs::read_to_string(path)?;
    Ok(toml::from_str(&text)?)
}

fn write_document(path: &Path, document: &StoreDocument) -> StoreResult<()> {
    let text = toml::to_string_pretty(document)?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = tempfile::Builder::new()
        .prefix(".tmp.publicize-")
        .suffix(".toml")
        .tempfile_in(parent)?;
    temp.write_all(text.as_bytes())?;
    temp.as_file().sync_all()?;
    persist_tempfile(temp, path)?;

    debug!("Wrote connection store {}", path.display());
    Ok(())
}

fn persist_tempfile(temp: NamedTempFile, final_path: &Path) -> StoreResult<()> {
    temp.persist(final_path)
        .map(|_| ())
        .map_err(|err| StoreError::Io(err.error))
}

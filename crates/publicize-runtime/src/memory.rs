use crate::boundary::{ConnectionReader, PermissionGate, SkipWriter};
use crate::Result;
use publicize_format::{Connection, ConnectionId, PostId};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct MemoryState {
    connections: HashMap<PostId, Vec<Connection>>,
    skips: BTreeSet<(PostId, ConnectionId)>,
    writes: usize,
}

/// In-process connection store.
///
/// Serves as reader, writer and gate at once. The snapshot's `enabled` flag is
/// derived from the skip records, the same way a persistent backend would.
#[derive(Debug)]
pub struct MemoryConnectionStore {
    state: Mutex<MemoryState>,
    denied_posts: HashSet<PostId>,
    authenticated: bool,
}

impl MemoryConnectionStore {
    /// Create an empty store that grants access to every post.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MemoryState::default()),
            denied_posts: HashSet::new(),
            authenticated: true,
        }
    }

    /// Register a post's connections, seeding skip records from `enabled`.
    pub fn with_connections(self, post_id: PostId, connections: Vec<Connection>) -> Self {
        {
            let mut state = self.lock();
            for connection in &connections {
                if !connection.enabled {
                    state.skips.insert((post_id, connection.unique_id.clone()));
                }
            }
            state.connections.insert(post_id, connections);
        }
        self
    }

    /// Refuse access to a post.
    pub fn deny(mut self, post_id: PostId) -> Self {
        self.denied_posts.insert(post_id);
        self
    }

    /// Mark the current actor as logged in or anonymous.
    pub fn with_authenticated(mut self, authenticated: bool) -> Self {
        self.authenticated = authenticated;
        self
    }

    /// Whether a skip record exists.
    pub fn is_skipped(&self, post_id: PostId, connection_id: &str) -> bool {
        self.lock()
            .skips
            .contains(&(post_id, ConnectionId::from(connection_id)))
    }

    /// Ids with a skip record for the post.
    pub fn skipped(&self, post_id: PostId) -> Vec<ConnectionId> {
        self.lock()
            .skips
            .iter()
            .filter(|(post, _)| *post == post_id)
            .map(|(_, id)| id.clone())
            .collect()
    }

    /// Total number of set/clear calls received.
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MemoryConnectionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectionReader for MemoryConnectionStore {
    fn list_connections(&self, post_id: PostId) -> Result<Vec<Connection>> {
        let state = self.lock();
        let Some(connections) = state.connections.get(&post_id) else {
            return Ok(Vec::new());
        };

        Ok(connections
            .iter()
            .map(|connection| {
                let mut connection = connection.clone();
                connection.enabled = !state
                    .skips
                    .contains(&(post_id, connection.unique_id.clone()));
                connection
            })
            .collect())
    }
}

impl SkipWriter for MemoryConnectionStore {
    fn set_skip(&self, post_id: PostId, connection_id: &ConnectionId) -> Result<()> {
        let mut state = self.lock();
        state.writes += 1;
        state.skips.insert((post_id, connection_id.clone()));
        Ok(())
    }

    fn clear_skip(&self, post_id: PostId, connection_id: &ConnectionId) -> Result<()> {
        let mut state = self.lock();
        state.writes += 1;
        state.skips.remove(&(post_id, connection_id.clone()));
        Ok(())
    }
}

impl PermissionGate for MemoryConnectionStore {
    fn can_access_connections(&self, post_id: PostId) -> bool {
        !self.denied_posts.contains(&post_id)
    }

    fn actor_is_authenticated(&self) -> bool {
        self.authenticated
    }
}

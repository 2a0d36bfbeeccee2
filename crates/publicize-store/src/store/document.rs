use publicize_format::{Connection, ConnectionId, PostId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const DEFAULT_POST_TYPE: &str = "post";

/// On-disk layout of a connection store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreDocument {
    #[serde(default)]
    pub actor: ActorRecord,
    #[serde(default)]
    pub connections: Vec<ConnectionRecord>,
    #[serde(default)]
    pub posts: Vec<PostRecord>,
}

/// The actor on whose behalf the store answers permission checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorRecord {
    #[serde(default = "default_true")]
    pub authenticated: bool,
}

impl Default for ActorRecord {
    fn default() -> Self {
        Self {
            authenticated: true,
        }
    }
}

/// A site-level connection to a sharing service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionRecord {
    pub unique_id: ConnectionId,
    pub service_name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default = "default_true")]
    pub toggleable: bool,
    /// Tokens, account metadata and anything else the service keeps.
    #[serde(flatten)]
    pub extra: BTreeMap<String, toml::Value>,
}

/// Per-post state: sharing progress and post meta.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    pub id: PostId,
    #[serde(default = "default_post_type")]
    pub post_type: String,
    #[serde(default = "default_true")]
    pub editable: bool,
    /// Connections the post has already been shared to.
    #[serde(default)]
    pub done: Vec<ConnectionId>,
    #[serde(default)]
    pub meta: BTreeMap<String, String>,
}

impl PostRecord {
    pub fn new(id: PostId) -> Self {
        Self {
            id,
            post_type: default_post_type(),
            editable: true,
            done: Vec::new(),
            meta: BTreeMap::new(),
        }
    }

    /// Whether a meta value is present and truthy.
    pub fn has_meta_flag(&self, key: &str) -> bool {
        self.meta
            .get(key)
            .is_some_and(|value| !value.is_empty() && value != "0")
    }
}

impl StoreDocument {
    pub fn post(&self, post_id: PostId) -> Option<&PostRecord> {
        self.posts.iter().find(|post| post.id == post_id)
    }

    pub fn post_mut(&mut self, post_id: PostId) -> Option<&mut PostRecord> {
        self.posts.iter_mut().find(|post| post.id == post_id)
    }
}

impl ConnectionRecord {
    /// The connection as seen from one post.
    pub(crate) fn to_connection(
        &self,
        enabled: bool,
        done: bool,
    ) -> serde_json::Result<Connection> {
        let mut extra = BTreeMap::new();
        for (key, value) in &self.extra {
            extra.insert(key.clone(), serde_json::to_value(value)?);
        }

        Ok(Connection {
            unique_id: self.unique_id.clone(),
            service_name: self.service_name.clone(),
            display_name: self.display_name.clone(),
            enabled,
            done,
            toggleable: self.toggleable,
            extra,
        })
    }
}

fn default_true() -> bool {
    true
}

fn default_post_type() -> String {
    DEFAULT_POST_TYPE.to_string()
}

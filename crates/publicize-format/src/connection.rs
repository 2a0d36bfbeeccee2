use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

/// Stable identifier of a connection, unique within a post's connection set.
///
/// Source systems hand out both numeric and string identifiers. Everything is
/// normalized to the string form on the way in, so lookups never depend on
/// how the id was originally typed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawConnectionId", into = "String")]
pub struct ConnectionId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawConnectionId {
    Text(String),
    Unsigned(u64),
    Signed(i64),
}

impl TryFrom<RawConnectionId> for ConnectionId {
    type Error = crate::Error;

    fn try_from(raw: RawConnectionId) -> crate::Result<Self> {
        match raw {
            RawConnectionId::Text(text) if text.is_empty() => {
                Err(crate::Error::InvalidId("empty string".to_string()))
            }
            RawConnectionId::Text(text) => Ok(Self(text)),
            RawConnectionId::Unsigned(n) => Ok(Self(n.to_string())),
            RawConnectionId::Signed(n) => Ok(Self(n.to_string())),
        }
    }
}

impl ConnectionId {
    /// Build an id from a JSON value, accepting strings and integers.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(text) if !text.is_empty() => Some(Self(text.clone())),
            serde_json::Value::Number(n) if n.is_u64() || n.is_i64() => Some(Self(n.to_string())),
            _ => None,
        }
    }

    /// Borrow the normalized string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ConnectionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ConnectionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u64> for ConnectionId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl From<ConnectionId> for String {
    fn from(value: ConnectionId) -> Self {
        value.0
    }
}

impl Borrow<str> for ConnectionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A sharing connection as seen from one post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    /// Identifier of the connection.
    pub unique_id: ConnectionId,
    /// Slug of the sharing service (e.g., "twitter"). Not unique.
    pub service_name: String,
    /// Username or label of the connected account.
    #[serde(default)]
    pub display_name: String,
    /// Whether this post is slated to be shared to the connection.
    pub enabled: bool,
    /// Whether sharing already happened for this post.
    pub done: bool,
    /// Whether the current actor may change `enabled`.
    pub toggleable: bool,
    /// Any other keys the source record carried. Never exposed externally.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Connection {
    /// Create a connection with no extra fields.
    pub fn new(
        unique_id: impl Into<ConnectionId>,
        service_name: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            unique_id: unique_id.into(),
            service_name: service_name.into(),
            display_name: display_name.into(),
            enabled: true,
            done: false,
            toggleable: true,
            extra: BTreeMap::new(),
        }
    }

    /// Set the `enabled` flag.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the `done` flag.
    pub fn with_done(mut self, done: bool) -> Self {
        self.done = done;
        self
    }

    /// Set the `toggleable` flag.
    pub fn with_toggleable(mut self, toggleable: bool) -> Self {
        self.toggleable = toggleable;
        self
    }

    /// Attach an internal field that must never be projected.
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Whether a requested change to `enabled` may be applied.
    pub fn is_mutable(&self) -> bool {
        !self.done && self.toggleable
    }

    /// Decode a list of connections from a JSON array.
    pub fn list_from_json(data: &[u8]) -> crate::Result<Vec<Self>> {
        serde_json::from_slice(data).map_err(|e| crate::Error::InvalidConnection(e.to_string()))
    }
}

use crate::Connection;
use serde::{Deserialize, Serialize};

/// REST context a field is rendered for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldContext {
    /// Public rendering; share state is hidden.
    View,
    /// Editor rendering; everything is visible.
    #[default]
    Edit,
}

impl FieldContext {
    /// Whether edit-only properties are included.
    pub fn includes_share_state(self) -> bool {
        matches!(self, FieldContext::Edit)
    }
}

/// Externally visible shape of one connection on a post.
///
/// Built field by field from a [`Connection`]; nothing outside this struct can
/// leak into the serialized output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostConnection {
    /// Connection unique id, always rendered as a string.
    pub id: String,
    /// Service slug.
    pub service_name: String,
    /// Username of the connected account.
    pub display_name: String,
    /// Whether the post will be shared to this connection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Whether sharing already finished for this post.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
    /// Whether `enabled` can be changed for this post and connection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toggleable: Option<bool>,
}

impl PostConnection {
    /// Project a connection for the given context.
    pub fn project(connection: &Connection, context: FieldContext) -> Self {
        let share_state = context.includes_share_state();
        Self {
            id: connection.unique_id.to_string(),
            service_name: connection.service_name.clone(),
            display_name: connection.display_name.clone(),
            enabled: share_state.then_some(connection.enabled),
            done: share_state.then_some(connection.done),
            toggleable: share_state.then_some(connection.toggleable),
        }
    }

    /// Project a full snapshot, preserving order.
    pub fn project_all(connections: &[Connection], context: FieldContext) -> Vec<Self> {
        connections
            .iter()
            .map(|connection| Self::project(connection, context))
            .collect()
    }
}

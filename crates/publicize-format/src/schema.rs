use serde_json::{json, Value};

/// Name of the REST field that carries a post's connections.
pub const FIELD_NAME: &str = "publicize_connections";

const JSON_SCHEMA_DRAFT: &str = "http://json-schema.org/draft-04/schema#";

/// Schema of the connections field: an array of connection objects.
pub fn post_connections_schema() -> Value {
    json!({
        "$schema": JSON_SCHEMA_DRAFT,
        "title": "publicize-post-connections",
        "type": "array",
        "context": ["view", "edit"],
        "items": post_connection_schema(),
        "default": []
    })
}

/// Schema of a single connection object.
pub fn post_connection_schema() -> Value {
    json!({
        "$schema": JSON_SCHEMA_DRAFT,
        "title": "publicize-post-connection",
        "type": "object",
        "properties": {
            "id": {
                "description": "Unique identifier for the Publicize Connection",
                "type": "string",
                "context": ["view", "edit"],
                "readonly": true
            },
            "service_name": {
                "description": "Alphanumeric identifier for the Publicize Service",
                "type": "string",
                "context": ["view", "edit"],
                "readonly": true
            },
            "display_name": {
                "description": "Username of the connected account",
                "type": "string",
                "context": ["view", "edit"],
                "readonly": true
            },
            "enabled": {
                "description": "Whether to share to this connection",
                "type": "boolean",
                "context": ["edit"]
            },
            "done": {
                "description": "Whether Publicize has already finished sharing for this post",
                "type": "boolean",
                "context": ["edit"],
                "readonly": true
            },
            "toggleable": {
                "description": "Whether `enabled` can be changed for this post/connection",
                "type": "boolean",
                "context": ["edit"],
                "readonly": true
            }
        }
    })
}

/// Property names declared by the connection schema, in declaration order.
pub const VISIBLE_PROPERTIES: [&str; 6] = [
    "id",
    "service_name",
    "display_name",
    "enabled",
    "done",
    "toggleable"
];

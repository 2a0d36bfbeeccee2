use crate::ConnectionId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single share-toggle request.
///
/// `service_name` targets every connection of that service, `id` targets one
/// connection. An item may carry both; the id-scoped interpretation is applied
/// after the service-wide one, so it wins for that connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionRequest {
    /// Service slug the request applies to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
    /// Connection the request applies to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ConnectionId>,
    /// Requested share intent.
    pub enabled: bool,
}

impl ConnectionRequest {
    /// Request applying to every connection of a service.
    pub fn for_service(service_name: impl Into<String>, enabled: bool) -> Self {
        Self {
            service_name: Some(service_name.into()),
            id: None,
            enabled,
        }
    }

    /// Request applying to exactly one connection.
    pub fn for_connection(id: impl Into<ConnectionId>, enabled: bool) -> Self {
        Self {
            service_name: None,
            id: Some(id.into()),
            enabled,
        }
    }

    /// Interpret one raw item, returning `None` for anything malformed.
    pub fn from_json(item: &Value) -> Option<Self> {
        let object = item.as_object()?;
        let enabled = object.get("enabled")?.as_bool()?;
        let service_name = object
            .get("service_name")
            .and_then(Value::as_str)
            .map(str::to_string);
        let id = object.get("id").and_then(ConnectionId::from_json);

        if service_name.is_none() && id.is_none() {
            return None;
        }

        Some(Self {
            service_name,
            id,
            enabled,
        })
    }
}

/// Requests accepted from a raw write value, in their original order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestBatch {
    /// Well-formed requests.
    pub items: Vec<ConnectionRequest>,
    /// Number of entries that were dropped as malformed.
    pub ignored: usize,
}

impl RequestBatch {
    /// Parse a raw write value leniently.
    ///
    /// Malformed entries are counted and dropped rather than rejected. A value
    /// that is not an array yields an empty batch.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => Self::default(),
            Value::Array(entries) => {
                let mut batch = Self::default();
                for entry in entries {
                    match ConnectionRequest::from_json(entry) {
                        Some(request) => batch.items.push(request),
                        None => batch.ignored += 1,
                    }
                }
                batch
            }
            _ => Self {
                items: Vec::new(),
                ignored: 1,
            },
        }
    }

    /// Parse raw JSON bytes; only invalid JSON is an error.
    pub fn from_slice(data: &[u8]) -> crate::Result<Self> {
        let value: Value = serde_json::from_slice(data)?;
        Ok(Self::from_value(&value))
    }

    /// Whether nothing usable was supplied.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<Vec<ConnectionRequest>> for RequestBatch {
    fn from(items: Vec<ConnectionRequest>) -> Self {
        Self { items, ignored: 0 }
    }
}

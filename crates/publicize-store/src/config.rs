use crate::{StoreError, StoreResult};
use publicize_format::ConnectionId;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const DEFAULT_SKIP_KEY_PREFIX: &str = "_wpas_skip_";
const DEFAULT_POST_TYPE: &str = "post";

/// Settings of a file-backed connection store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Prefix of the post meta key holding a connection's skip record.
    pub skip_key_prefix: String,
    /// Post types that support sharing.
    pub post_types: Vec<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            skip_key_prefix: DEFAULT_SKIP_KEY_PREFIX.to_string(),
            post_types: vec![DEFAULT_POST_TYPE.to_string()],
        }
    }
}

impl StoreConfig {
    /// Parse a config from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> StoreResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file.
    pub fn load<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// Meta key of the skip record for a connection.
    pub fn skip_key(&self, connection_id: &ConnectionId) -> String {
        format!("{}{}", self.skip_key_prefix, connection_id)
    }

    /// Connection id encoded in a meta key, if it is a skip record key.
    pub fn connection_for_key(&self, key: &str) -> Option<ConnectionId> {
        key.strip_prefix(&self.skip_key_prefix)
            .filter(|id| !id.is_empty())
            .map(ConnectionId::from)
    }

    pub fn supports_post_type(&self, post_type: &str) -> bool {
        self.post_types.iter().any(|t| t == post_type)
    }

    fn validate(&self) -> StoreResult<()> {
        if self.skip_key_prefix.trim().is_empty() {
            return Err(StoreError::InvalidConfig(
                "skip_key_prefix cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

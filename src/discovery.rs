use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub const SERVERS_KEY: &str = "mcpServers";

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("configuration file '{0}' not found")]
    NotFound(PathBuf),

    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error decoding JSON from '{path}': {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid tool server configuration in '{0}': {1}")]
    Invalid(PathBuf, String),
}

/// One entry under `mcpServers`. Launch fields are optional so both
/// command-style and URL-style servers load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Static list of tool servers loaded from a JSON config file.
#[derive(Debug, Clone)]
pub struct ServerDiscovery {
    path: PathBuf,
    servers: BTreeMap<String, ServerEntry>,
}

impl ServerDiscovery {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DiscoveryError> {
        let path = path.as_ref().to_path_buf();

        let raw = std::fs::read_to_string(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                DiscoveryError::NotFound(path.clone())
            } else {
                DiscoveryError::Io {
                    path: path.clone(),
                    source,
                }
            }
        })?;

        let doc: Value = serde_json::from_str(&raw).map_err(|source| DiscoveryError::Json {
            path: path.clone(),
            source,
        })?;

        let Value::Object(mut root) = doc else {
            return Err(DiscoveryError::Invalid(path, "top level must be an object".into()));
        };
        let section = root.remove(SERVERS_KEY).ok_or_else(|| {
            DiscoveryError::Invalid(path.clone(), format!("no '{SERVERS_KEY}' key"))
        })?;
        let servers: BTreeMap<String, ServerEntry> = serde_json::from_value(section)
            .map_err(|e| DiscoveryError::Invalid(path.clone(), e.to_string()))?;

        tracing::info!(path = %path.display(), count = servers.len(), "Loaded tool server config");
        Ok(Self { path, servers })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn list_servers(&self) -> &BTreeMap<String, ServerEntry> {
        &self.servers
    }

    pub fn get(&self, name: &str) -> Option<&ServerEntry> {
        self.servers.get(name)
    }
}

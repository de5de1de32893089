//! Application configuration for netdiag

use crate::error::{NdError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration stored in ~/.nd/config.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Debug agent coordinates
    #[serde(default)]
    pub agent: AgentConfig,

    /// Hard wall-clock bound for one remote command, in seconds
    #[serde(default = "default_exec_timeout")]
    pub exec_timeout_secs: u64,

    /// Node-name cache TTL in seconds
    #[serde(default = "default_cache_ttl")]
    pub node_cache_ttl_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            agent: AgentConfig::default(),
            exec_timeout_secs: default_exec_timeout(),
            node_cache_ttl_secs: default_cache_ttl(),
        }
    }
}

/// Where the diagnostic agent pods live and how to address them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    #[serde(default = "default_agent_namespace")]
    pub namespace: String,

    #[serde(default = "default_agent_label")]
    pub label_selector: String,

    #[serde(default = "default_agent_container")]
    pub container: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            namespace: default_agent_namespace(),
            label_selector: default_agent_label(),
            container: default_agent_container(),
        }
    }
}

fn default_exec_timeout() -> u64 {
    30
}

fn default_cache_ttl() -> u64 {
    60
}

fn default_agent_namespace() -> String {
    "netdiag".to_string()
}

fn default_agent_label() -> String {
    "app.kubernetes.io/name=netdiag-agent".to_string()
}

fn default_agent_container() -> String {
    "netshoot".to_string()
}

/// Get the netdiag config directory (~/.nd)
pub fn config_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|h| h.join(".nd"))
        .ok_or_else(|| NdError::Config("Could not determine home directory".to_string()))
}

/// Load application config from ~/.nd/config.toml
pub fn load_config() -> Result<AppConfig> {
    let path = config_dir()?.join("config.toml");
    if path.exists() {
        let content = std::fs::read_to_string(&path)?;
        toml::from_str(&content).map_err(|e| NdError::Config(e.to_string()))
    } else {
        Ok(AppConfig::default())
    }
}

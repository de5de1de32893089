//! Diagnostic agent addressing
//!
//! Agent pods run as a DaemonSet of netshoot containers; a command is routed
//! to a node by locating the ready agent pod pinned there. Lookup happens on
//! every call since agent pods may be recreated between calls.

use crate::cluster::{AgentHandle, ExecResult, NodeDirectory, PodExecutor};
use crate::config::AgentConfig;
use crate::error::{NdError, Result};
use crate::validate;

/// Coordinates of the diagnostic agent tier.
#[derive(Debug, Clone)]
pub struct DebugAgent {
    pub namespace: String,
    pub label_selector: String,
    pub container: String,
}

impl Default for DebugAgent {
    fn default() -> Self {
        let config = AgentConfig::default();
        Self {
            namespace: config.namespace,
            label_selector: config.label_selector,
            container: config.container,
        }
    }
}

impl DebugAgent {
    /// Build from configuration, rejecting identifier shapes that could not
    /// name a real namespace or container.
    pub fn from_config(config: &AgentConfig) -> Result<Self> {
        if !validate::is_dns_label(&config.namespace) {
            return Err(NdError::Config(format!(
                "agent namespace '{}' is not a valid DNS label",
                config.namespace
            )));
        }
        if !validate::is_dns_label(&config.container) {
            return Err(NdError::Config(format!(
                "agent container '{}' is not a valid DNS label",
                config.container
            )));
        }
        if config.label_selector.trim().is_empty() {
            return Err(NdError::Config(
                "agent label selector must not be empty".to_string(),
            ));
        }

        Ok(Self {
            namespace: config.namespace.clone(),
            label_selector: config.label_selector.clone(),
            container: config.container.clone(),
        })
    }

    /// Locate the ready agent pod on `node` and run `command` in it.
    pub async fn exec_on_node(
        &self,
        directory: &dyn NodeDirectory,
        executor: &dyn PodExecutor,
        node: &str,
        command: &[String],
    ) -> Result<ExecResult> {
        let pod = directory
            .find_ready_agent(&self.namespace, &self.label_selector, node)
            .await?
            .ok_or_else(|| {
                NdError::NotFound(format!("No ready debug-agent pod found on node '{node}'"))
            })?;

        let handle = AgentHandle {
            namespace: self.namespace.clone(),
            pod,
            container: self.container.clone(),
        };

        executor.exec(&handle, command).await
    }
}

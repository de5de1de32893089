//! Diagnostic operations
//!
//! The composed, input-validated operations callers actually invoke. Each
//! one validates every identifier before touching the network, routes the
//! command through the debug agent on the target node, and applies the
//! format parsers to the raw output. Operations share no mutable state
//! beyond the node registry, so any number may run concurrently.

use crate::agent::DebugAgent;
use crate::cluster::{ExecResult, NodeDirectory, PodExecutor};
use crate::error::Result;
use crate::registry::NodeRegistry;
use std::sync::Arc;

pub mod connectivity;
pub mod conntrack;
pub mod firewall;
pub mod http;
pub mod networking;
pub mod types;

pub use types::*;

/// Entry point for all diagnostic operations.
pub struct Diagnostics {
    directory: Arc<dyn NodeDirectory>,
    executor: Arc<dyn PodExecutor>,
    registry: NodeRegistry,
    agent: DebugAgent,
}

impl Diagnostics {
    pub fn new(
        directory: Arc<dyn NodeDirectory>,
        executor: Arc<dyn PodExecutor>,
        agent: DebugAgent,
        registry: NodeRegistry,
    ) -> Self {
        Self {
            directory,
            executor,
            registry,
            agent,
        }
    }

    /// Reject node names the registry does not currently know.
    pub(crate) async fn validate_node(&self, node: &str) -> Result<()> {
        self.registry.validate(self.directory.as_ref(), node).await
    }

    /// Fresh snapshot of valid node names.
    pub(crate) async fn node_names(&self) -> Result<Vec<String>> {
        self.registry.node_names(self.directory.as_ref()).await
    }

    /// Run an argv command through the agent pinned to `node`.
    pub(crate) async fn exec_on_node(&self, node: &str, command: &[String]) -> Result<ExecResult> {
        self.agent
            .exec_on_node(self.directory.as_ref(), self.executor.as_ref(), node, command)
            .await
    }
}

/// Build an argv vector from string literals and computed tokens.
pub(crate) fn argv<I, S>(tokens: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    tokens.into_iter().map(Into::into).collect()
}

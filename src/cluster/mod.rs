//! Cluster collaborator seams
//!
//! The diagnostics core never talks to the Kubernetes API directly; it is
//! handed a [`NodeDirectory`] (node inventory and agent pod lookup) and a
//! [`PodExecutor`] (argv exec against a pod container). The kube-backed
//! implementation lives in [`kube`]; tests substitute mocks.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod kube;

pub use self::kube::KubeCluster;

/// Ephemeral reference to a located diagnostic agent.
///
/// Valid for one exec call only; agent pods may be recreated between calls,
/// so handles are never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentHandle {
    pub namespace: String,
    pub pod: String,
    pub container: String,
}

/// Raw outcome of one remote command execution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl ExecResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Trimmed stderr, or `None` when there is nothing to report.
    pub fn stderr_trimmed(&self) -> Option<String> {
        let trimmed = self.stderr.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

/// Node inventory and agent pod lookup.
#[async_trait]
pub trait NodeDirectory: Send + Sync {
    /// Names of all nodes currently known to the cluster.
    async fn list_node_names(&self) -> Result<Vec<String>>;

    /// Find a pod in `namespace` matching `label_selector`, scheduled on
    /// `node` and reporting a `Ready` condition. Returns the pod name.
    async fn find_ready_agent(
        &self,
        namespace: &str,
        label_selector: &str,
        node: &str,
    ) -> Result<Option<String>>;
}

/// Argv-style command execution against a pod container. No shell is
/// involved at this layer; callers needing shell features must invoke one
/// explicitly.
#[async_trait]
pub trait PodExecutor: Send + Sync {
    async fn exec(&self, handle: &AgentHandle, command: &[String]) -> Result<ExecResult>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stderr_trimmed() {
        let result = ExecResult {
            stdout: String::new(),
            stderr: "  warning: something  \n".to_string(),
            exit_code: 0,
        };
        assert_eq!(result.stderr_trimmed().as_deref(), Some("warning: something"));

        let clean = ExecResult::default();
        assert!(clean.stderr_trimmed().is_none());
        assert!(clean.success());
    }
}

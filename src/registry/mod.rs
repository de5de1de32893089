//! Node registry cache
//!
//! Keeps the last-known set of node names with a TTL so per-call validation
//! does not hammer the node inventory. A stale snapshot is never used past
//! expiry: validation refreshes synchronously first, and a refresh failure
//! propagates instead of silently passing. Concurrent refreshes may race;
//! the last writer wins, which is all eventual freshness needs.

use crate::cluster::NodeDirectory;
use crate::error::{NdError, Result};
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Default time-to-live for the node-name snapshot.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// Injected time source so expiry is testable without wall-clock sleeps.
pub type Clock = Box<dyn Fn() -> Instant + Send + Sync>;

struct Snapshot {
    nodes: Vec<String>,
    fetched_at: Instant,
}

/// TTL cache over the cluster's node names.
pub struct NodeRegistry {
    ttl: Duration,
    clock: Clock,
    inner: RwLock<Option<Snapshot>>,
}

impl NodeRegistry {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Box::new(Instant::now))
    }

    pub fn with_clock(ttl: Duration, clock: Clock) -> Self {
        Self {
            ttl,
            clock,
            inner: RwLock::new(None),
        }
    }

    /// Current node names, refreshed from the directory when expired.
    pub async fn node_names(&self, directory: &dyn NodeDirectory) -> Result<Vec<String>> {
        if let Some(nodes) = self.fresh() {
            return Ok(nodes);
        }

        let nodes = directory.list_node_names().await?;
        let fetched_at = (self.clock)();

        let mut guard = self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Some(Snapshot {
            nodes: nodes.clone(),
            fetched_at,
        });

        Ok(nodes)
    }

    /// Check `node` against the current registry snapshot.
    ///
    /// An unknown node yields a validation error listing the valid names so
    /// the caller never issues a remote command for it.
    pub async fn validate(&self, directory: &dyn NodeDirectory, node: &str) -> Result<()> {
        let nodes = self.node_names(directory).await?;

        if nodes.iter().any(|n| n == node) {
            Ok(())
        } else {
            Err(NdError::Validation(format!(
                "Invalid node '{node}'. Valid nodes: {}",
                nodes.join(", ")
            )))
        }
    }

    fn fresh(&self) -> Option<Vec<String>> {
        let guard = self
            .inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let snapshot = guard.as_ref()?;

        let now = (self.clock)();
        if now.saturating_duration_since(snapshot.fetched_at) < self.ttl {
            Some(snapshot.nodes.clone())
        } else {
            None
        }
    }
}

//! kube-backed implementation of the cluster seams
//!
//! Hosts the remote exec channel: one command-execution session per call,
//! incremental stdout/stderr collection, and a hard wall-clock timeout.
//! Exactly one of completion, timeout or transport failure resolves a call;
//! the timeout drops the in-flight session, so late events from the
//! transport are discarded.

use crate::cluster::{AgentHandle, ExecResult, NodeDirectory, PodExecutor};
use crate::error::{NdError, Result};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Pod;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::Status;
use kube::api::{Api, AttachParams, ListParams};
use kube::Client;
use std::future::Future;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::debug;

/// Shown when the transport fails without any usable detail. An empty error
/// gives an operator nothing to act on.
const CONNECTION_FAILED_HINT: &str =
    "connection failed: check network policy and access control for the exec subresource";

/// Exit code reported when the remote command failed but the transport did
/// not carry a precise code.
const FAILURE_EXIT_CODE: i32 = 1;

/// Kubernetes-backed node directory and pod executor.
pub struct KubeCluster {
    client: Client,
    exec_timeout: Duration,
}

impl KubeCluster {
    pub fn new(client: Client, exec_timeout: Duration) -> Self {
        Self {
            client,
            exec_timeout,
        }
    }
}

#[async_trait]
impl NodeDirectory for KubeCluster {
    async fn list_node_names(&self) -> Result<Vec<String>> {
        let nodes: Api<k8s_openapi::api::core::v1::Node> = Api::all(self.client.clone());
        let list = nodes
            .list(&ListParams::default())
            .await
            .map_err(|e| NdError::Transport(classify_transport(&e)))?;

        Ok(list
            .items
            .into_iter()
            .filter_map(|n| n.metadata.name)
            .collect())
    }

    async fn find_ready_agent(
        &self,
        namespace: &str,
        label_selector: &str,
        node: &str,
    ) -> Result<Option<String>> {
        let pods: Api<Pod> = Api::namespaced(self.client.clone(), namespace);
        let lp = ListParams::default()
            .labels(label_selector)
            .fields(&format!("spec.nodeName={node}"));

        let list = pods
            .list(&lp)
            .await
            .map_err(|e| NdError::Transport(classify_transport(&e)))?;

        Ok(list
            .items
            .into_iter()
            .find(is_pod_ready)
            .and_then(|p| p.metadata.name))
    }
}

#[async_trait]
impl PodExecutor for KubeCluster {
    async fn exec(&self, handle: &AgentHandle, command: &[String]) -> Result<ExecResult> {
        let pods: Api<Pod> = Api::namespaced(self.client.clone(), &handle.namespace);

        let ap = AttachParams::default()
            .container(&handle.container)
            .stdin(false)
            .stdout(true)
            .stderr(true);

        debug!(
            pod = %handle.pod,
            namespace = %handle.namespace,
            ?command,
            "executing command on debug agent"
        );

        let session = async {
            let mut attached = pods
                .exec(&handle.pod, command.to_vec(), &ap)
                .await
                .map_err(|e| NdError::Transport(classify_transport(&e)))?;

            let stdout = attached.stdout();
            let stderr = attached.stderr();
            let status = attached.take_status();

            // Output is drained as it arrives rather than buffered by the
            // transport; status resolves when the remote command reports.
            let (stdout, stderr, status) = tokio::join!(
                collect_stream(stdout),
                collect_stream(stderr),
                async {
                    match status {
                        Some(fut) => fut.await,
                        None => None,
                    }
                }
            );

            // join surfaces remote-command protocol errors, not API errors.
            attached
                .join()
                .await
                .map_err(|e| NdError::Transport(e.to_string()))?;

            Ok(ExecResult {
                stdout,
                stderr,
                exit_code: exit_code_from_status(status),
            })
        };

        run_with_deadline(self.exec_timeout, handle, session).await
    }
}

/// Bound one exec session by wall clock.
///
/// Expiry resolves the call with a timeout error naming the agent and drops
/// the in-flight session, so a completion arriving afterwards is discarded
/// rather than delivered twice.
async fn run_with_deadline<F>(
    deadline: Duration,
    handle: &AgentHandle,
    session: F,
) -> Result<ExecResult>
where
    F: Future<Output = Result<ExecResult>>,
{
    match tokio::time::timeout(deadline, session).await {
        Ok(result) => result,
        Err(_) => Err(NdError::ExecTimeout {
            timeout_secs: deadline.as_secs(),
            namespace: handle.namespace.clone(),
            pod: handle.pod.clone(),
        }),
    }
}

/// Read a stream to completion into a string, lossily decoding UTF-8.
async fn collect_stream(reader: Option<impl AsyncRead + Unpin>) -> String {
    let mut collected = Vec::new();

    if let Some(mut reader) = reader {
        let mut buf = vec![0u8; 4096];
        loop {
            match reader.read(&mut buf).await {
                Ok(0) => break,
                Ok(n) => collected.extend_from_slice(&buf[..n]),
                Err(_) => break,
            }
        }
    }

    String::from_utf8_lossy(&collected).into_owned()
}

/// Map the exec status object to an exit code.
///
/// The protocol only reports success/failure plus, for non-zero exits, an
/// optional `ExitCode` cause. The native code is preserved when present and
/// collapses to a sentinel otherwise.
fn exit_code_from_status(status: Option<Status>) -> i32 {
    let Some(status) = status else {
        return FAILURE_EXIT_CODE;
    };

    if status.status.as_deref() == Some("Success") {
        return 0;
    }

    status
        .details
        .and_then(|d| d.causes)
        .unwrap_or_default()
        .into_iter()
        .find(|c| c.reason.as_deref() == Some("ExitCode"))
        .and_then(|c| c.message)
        .and_then(|m| m.parse().ok())
        .unwrap_or(FAILURE_EXIT_CODE)
}

/// Normalize transport-level failures to a human-readable message.
///
/// API errors carry a structured body whose message is unwrapped; anything
/// opaque falls back to a fixed guidance string rather than surfacing an
/// empty error.
pub fn classify_transport(err: &kube::Error) -> String {
    match err {
        kube::Error::Api(resp) if !resp.message.trim().is_empty() => resp.message.clone(),
        other => {
            let message = other.to_string();
            if message.trim().is_empty() {
                CONNECTION_FAILED_HINT.to_string()
            } else {
                message
            }
        }
    }
}

/// A pod counts as a usable agent only when its `Ready` condition is `True`.
fn is_pod_ready(pod: &Pod) -> bool {
    pod.status
        .as_ref()
        .and_then(|s| s.conditions.as_ref())
        .map(|conditions| {
            conditions
                .iter()
                .any(|c| c.type_ == "Ready" && c.status == "True")
        })
        .unwrap_or(false)
}

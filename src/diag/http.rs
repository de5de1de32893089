//! Timed HTTP probe from inside the cluster

use crate::diag::types::HttpProbe;
use crate::diag::{argv, Diagnostics};
use crate::error::{NdError, Result};
use crate::parse::{curl_write_format, parse_probe};
use crate::validate;

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const MAX_TIMEOUT_SECS: u64 = 30;

impl Diagnostics {
    /// Fetch `url` with curl from a node, reporting status and timing
    /// phases. Without an explicit `from_node` any node will do; the first
    /// registry entry is used.
    pub async fn http_probe(
        &self,
        url: &str,
        timeout_secs: Option<u64>,
        from_node: Option<&str>,
    ) -> Result<HttpProbe> {
        validate::parse_probe_url(url)?;

        let timeout_secs = timeout_secs
            .unwrap_or(DEFAULT_TIMEOUT_SECS)
            .clamp(1, MAX_TIMEOUT_SECS);

        let node = match from_node {
            Some(node) => {
                self.validate_node(node).await?;
                node.to_string()
            }
            None => self
                .node_names()
                .await?
                .into_iter()
                .next()
                .ok_or_else(|| {
                    NdError::Validation("No cluster nodes available".to_string())
                })?,
        };

        let write_format = curl_write_format();
        let max_time = timeout_secs.to_string();
        let result = self
            .exec_on_node(
                &node,
                &argv([
                    "curl",
                    "-sk",
                    "-o",
                    "/dev/null",
                    "-w",
                    write_format.as_str(),
                    "--max-time",
                    max_time.as_str(),
                    url,
                ]),
            )
            .await?;

        let probe = parse_probe(&result.stdout).ok_or_else(|| {
            NdError::Parse(format!(
                "Failed to parse curl output: {}",
                result.stdout.trim()
            ))
        })?;

        Ok(HttpProbe {
            url: url.to_string(),
            node,
            status_code: probe.status_code,
            timing: probe.timing,
            remote: probe.remote,
            size_bytes: probe.size_bytes,
            exit_code: result.exit_code,
            stderr: result.stderr_trimmed(),
        })
    }
}

//! Ping and TCP reachability check from a node

use crate::diag::types::{ConnectivityReport, PingCheck, TcpCheck};
use crate::diag::{argv, Diagnostics};
use crate::error::{NdError, Result};
use crate::parse::parse_ping;
use crate::validate;

impl Diagnostics {
    /// Ping `target` from `source_node` and optionally test one TCP port.
    ///
    /// Loss and unreachability are reported as data; only validation,
    /// lookup and transport problems surface as errors.
    pub async fn connectivity(
        &self,
        source_node: &str,
        target: &str,
        port: Option<u16>,
    ) -> Result<ConnectivityReport> {
        self.validate_node(source_node).await?;

        if !validate::is_probe_target(target) {
            return Err(NdError::Validation(
                "Invalid target. Must be an IP address or hostname".to_string(),
            ));
        }

        let port = port.map(validate::check_port).transpose()?;

        let ping_result = self
            .exec_on_node(source_node, &argv(["ping", "-c", "3", "-W", "2", target]))
            .await?;

        // ping writes errors like "Name or service not known" to stderr;
        // parse over both streams so those runs still produce a summary.
        let combined = format!("{}{}", ping_result.stdout, ping_result.stderr);
        let ping = parse_ping(&combined);

        let tcp_connect = match port {
            Some(port) => {
                let port_str = port.to_string();
                let nc_result = self
                    .exec_on_node(
                        source_node,
                        &argv(["nc", "-z", "-w", "3", target, port_str.as_str()]),
                    )
                    .await?;

                Some(TcpCheck {
                    port,
                    open: nc_result.success(),
                    detail: nc_result.stderr_trimmed(),
                })
            }
            None => None,
        };

        Ok(ConnectivityReport {
            source_node: source_node.to_string(),
            target: target.to_string(),
            ping: PingCheck {
                transmitted: ping.transmitted,
                received: ping.received,
                loss_percent: ping.loss_percent,
                rtt_min_ms: ping.rtt_min,
                rtt_avg_ms: ping.rtt_avg,
                rtt_max_ms: ping.rtt_max,
                reachable: ping.received > 0,
            },
            tcp_connect,
        })
    }
}

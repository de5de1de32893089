//! Diagnostic result records
//!
//! Field names follow the wire convention consumed by the tool-dispatch
//! layer (camelCase), and optional stderr is omitted entirely when empty.

use crate::parse::{ConntrackEntry, IptablesChain, ProbeTiming, RemoteEndpoint};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// iptables tables reachable through the firewall dump operation. The fixed
/// set doubles as input validation: anything else never becomes an argv
/// token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FirewallTable {
    #[default]
    Filter,
    Nat,
    Mangle,
    Raw,
}

impl FirewallTable {
    pub fn as_str(&self) -> &'static str {
        match self {
            FirewallTable::Filter => "filter",
            FirewallTable::Nat => "nat",
            FirewallTable::Mangle => "mangle",
            FirewallTable::Raw => "raw",
        }
    }
}

impl fmt::Display for FirewallTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interfaces, addresses, routes and routing rules of one node.
///
/// Sections hold the `ip -j` JSON when it parsed and the raw section text
/// otherwise; the dump is advisory output, never a hard contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeNetworking {
    pub node: String,
    pub interfaces: serde_json::Value,
    pub addresses: serde_json::Value,
    pub routes: serde_json::Value,
    pub rules: serde_json::Value,
    pub exit_code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,
}

/// One parsed firewall table dump.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirewallRules {
    pub node: String,
    pub ip_version: u8,
    pub table: String,
    pub chains: Vec<IptablesChain>,
    pub exit_code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,
}

/// Connection-tracking entries from one node, truncated to the caller's
/// limit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConntrackReport {
    pub node: String,
    pub total: usize,
    pub truncated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    pub entries: Vec<ConntrackEntry>,
    pub exit_code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,
}

/// Timed HTTP probe issued from inside the cluster.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpProbe {
    pub url: String,
    pub node: String,
    pub status_code: i32,
    pub timing: ProbeTiming,
    pub remote: RemoteEndpoint,
    pub size_bytes: u64,
    pub exit_code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,
}

/// Ping plus optional TCP port check from a node to a target.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectivityReport {
    pub source_node: String,
    pub target: String,
    pub ping: PingCheck,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tcp_connect: Option<TcpCheck>,
}

/// An unreachable target is a normal result here, not a failure: the remote
/// ping exits non-zero but the record still reports what happened.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PingCheck {
    pub transmitted: u64,
    pub received: u64,
    pub loss_percent: f64,
    pub rtt_min_ms: Option<f64>,
    pub rtt_avg_ms: Option<f64>,
    pub rtt_max_ms: Option<f64>,
    pub reachable: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TcpCheck {
    pub port: u16,
    pub open: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

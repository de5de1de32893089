//! CLI command definitions using clap

use crate::diag::FirewallTable;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "nd",
    version,
    about = "Remote network diagnostics for Kubernetes nodes",
    long_about = None,
)]
pub struct Cli {
    /// Kubernetes context to use
    #[arg(long, global = true, env = "ND_CONTEXT")]
    pub context: Option<String>,

    /// Output format
    #[arg(short = 'o', long, global = true, value_enum, default_value = "json")]
    pub output: OutputFormat,

    /// Enable verbose logging
    #[arg(short = 'v', long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show interfaces, addresses, routes and routing rules for a node
    #[command(alias = "net")]
    Networking(NetworkingArgs),

    /// Dump iptables rules for a table on a node
    #[command(alias = "ipt")]
    Firewall(FirewallArgs),

    /// List connection-tracking entries on a node
    #[command(alias = "ct")]
    Conntrack(ConntrackArgs),

    /// Probe an HTTP(S) URL from inside the cluster
    Probe(ProbeArgs),

    /// Ping and optionally TCP-check a target from a node
    #[command(alias = "ping")]
    Connectivity(ConnectivityArgs),
}

#[derive(Args)]
pub struct NetworkingArgs {
    /// Node name to inspect
    pub node: String,
}

#[derive(Args)]
pub struct FirewallArgs {
    /// Node name to inspect
    pub node: String,

    /// iptables table to dump
    #[arg(short = 't', long, value_enum, default_value = "filter")]
    pub table: FirewallTable,

    /// Restrict output to a single chain (e.g. FORWARD, POSTROUTING)
    #[arg(short = 'c', long)]
    pub chain: Option<String>,

    /// Use ip6tables instead of iptables
    #[arg(long)]
    pub ipv6: bool,
}

#[derive(Args)]
pub struct ConntrackArgs {
    /// Node name to inspect
    pub node: String,

    /// Filter by source or destination IP/CIDR
    #[arg(short = 'f', long)]
    pub filter: Option<String>,

    /// Max entries to return (clamped to 1-200)
    #[arg(short = 'l', long, default_value_t = 50)]
    pub limit: i64,
}

#[derive(Args)]
pub struct ProbeArgs {
    /// URL to probe (http or https)
    pub url: String,

    /// Request timeout in seconds (clamped to 1-30)
    #[arg(short = 't', long, default_value_t = 10)]
    pub timeout: u64,

    /// Specific node to probe from; any node when omitted
    #[arg(long)]
    pub from_node: Option<String>,
}

#[derive(Args)]
pub struct ConnectivityArgs {
    /// Node to test from
    pub node: String,

    /// Target IP address or hostname
    pub target: String,

    /// TCP port to test in addition to ping
    #[arg(short = 'p', long)]
    pub port: Option<u16>,
}

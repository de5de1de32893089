//! Command dispatch
//!
//! Wires the CLI to the diagnostics core: builds the kube-backed cluster
//! seams, runs the requested operation and serializes the result. Failures
//! are serialized too; a failing diagnostic is a reported value, never a
//! crash.

use crate::agent::DebugAgent;
use crate::cli::{Cli, Command, OutputFormat};
use crate::client::create_client;
use crate::cluster::KubeCluster;
use crate::config::load_config;
use crate::diag::Diagnostics;
use crate::error::Result;
use crate::registry::NodeRegistry;
use std::sync::Arc;
use std::time::Duration;

/// Execute the parsed CLI command and print its result.
pub async fn run(cli: &Cli) -> Result<()> {
    let config = load_config()?;
    let agent = DebugAgent::from_config(&config.agent)?;

    let client = create_client(cli.context.as_deref()).await?;
    let cluster = Arc::new(KubeCluster::new(
        client,
        Duration::from_secs(config.exec_timeout_secs),
    ));

    let diag = Diagnostics::new(
        cluster.clone(),
        cluster,
        agent,
        NodeRegistry::new(Duration::from_secs(config.node_cache_ttl_secs)),
    );

    let value = match &cli.command {
        Command::Networking(args) => {
            serde_json::to_value(diag.node_networking(&args.node).await?)?
        }
        Command::Firewall(args) => serde_json::to_value(
            diag.firewall_rules(&args.node, args.table, args.chain.as_deref(), args.ipv6)
                .await?,
        )?,
        Command::Conntrack(args) => serde_json::to_value(
            diag.conntrack_entries(&args.node, args.filter.as_deref(), Some(args.limit))
                .await?,
        )?,
        Command::Probe(args) => serde_json::to_value(
            diag.http_probe(&args.url, Some(args.timeout), args.from_node.as_deref())
                .await?,
        )?,
        Command::Connectivity(args) => serde_json::to_value(
            diag.connectivity(&args.node, &args.target, args.port).await?,
        )?,
    };

    print_value(&value, cli.output)
}

/// Serialize a result value to the requested output format.
pub fn print_value(value: &serde_json::Value, output: OutputFormat) -> Result<()> {
    let rendered = match output {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
    };
    println!("{rendered}");
    Ok(())
}

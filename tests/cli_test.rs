//! CLI parsing tests for the nd command line interface

use clap::Parser;
use netdiag::cli::{Cli, Command, OutputFormat};
use netdiag::diag::FirewallTable;

// ============================================================================
// Basic command parsing tests
// ============================================================================

#[test]
fn test_parse_networking_command() {
    let args = Cli::parse_from(["nd", "networking", "node-a"]);
    match args.command {
        Command::Networking(a) => assert_eq!(a.node, "node-a"),
        _ => panic!("expected networking command"),
    }
}

#[test]
fn test_parse_networking_alias_net() {
    let args = Cli::parse_from(["nd", "net", "node-a"]);
    assert!(matches!(args.command, Command::Networking(_)));
}

#[test]
fn test_parse_firewall_defaults() {
    let args = Cli::parse_from(["nd", "firewall", "node-a"]);
    match args.command {
        Command::Firewall(a) => {
            assert_eq!(a.node, "node-a");
            assert_eq!(a.table, FirewallTable::Filter);
            assert!(a.chain.is_none());
            assert!(!a.ipv6);
        }
        _ => panic!("expected firewall command"),
    }
}

#[test]
fn test_parse_firewall_full() {
    let args = Cli::parse_from([
        "nd", "ipt", "node-a", "--table", "nat", "--chain", "POSTROUTING", "--ipv6",
    ]);
    match args.command {
        Command::Firewall(a) => {
            assert_eq!(a.table, FirewallTable::Nat);
            assert_eq!(a.chain.as_deref(), Some("POSTROUTING"));
            assert!(a.ipv6);
        }
        _ => panic!("expected firewall command"),
    }
}

#[test]
fn test_parse_firewall_rejects_unknown_table() {
    assert!(Cli::try_parse_from(["nd", "firewall", "node-a", "--table", "security"]).is_err());
}

#[test]
fn test_parse_conntrack_defaults() {
    let args = Cli::parse_from(["nd", "ct", "node-a"]);
    match args.command {
        Command::Conntrack(a) => {
            assert_eq!(a.limit, 50);
            assert!(a.filter.is_none());
        }
        _ => panic!("expected conntrack command"),
    }
}

#[test]
fn test_parse_conntrack_with_filter() {
    let args = Cli::parse_from(["nd", "conntrack", "node-a", "--filter", "10.0.0.0/24", "--limit", "100"]);
    match args.command {
        Command::Conntrack(a) => {
            assert_eq!(a.filter.as_deref(), Some("10.0.0.0/24"));
            assert_eq!(a.limit, 100);
        }
        _ => panic!("expected conntrack command"),
    }
}

#[test]
fn test_parse_probe() {
    let args = Cli::parse_from(["nd", "probe", "https://app.example.com", "--from-node", "node-b"]);
    match args.command {
        Command::Probe(a) => {
            assert_eq!(a.url, "https://app.example.com");
            assert_eq!(a.timeout, 10);
            assert_eq!(a.from_node.as_deref(), Some("node-b"));
        }
        _ => panic!("expected probe command"),
    }
}

#[test]
fn test_parse_connectivity() {
    let args = Cli::parse_from(["nd", "connectivity", "node-a", "10.0.0.1", "--port", "443"]);
    match args.command {
        Command::Connectivity(a) => {
            assert_eq!(a.node, "node-a");
            assert_eq!(a.target, "10.0.0.1");
            assert_eq!(a.port, Some(443));
        }
        _ => panic!("expected connectivity command"),
    }
}

#[test]
fn test_parse_connectivity_alias_ping() {
    let args = Cli::parse_from(["nd", "ping", "node-a", "example.com"]);
    assert!(matches!(args.command, Command::Connectivity(_)));
}

// ============================================================================
// Global options
// ============================================================================

#[test]
fn test_default_output_is_json() {
    let args = Cli::parse_from(["nd", "net", "node-a"]);
    assert_eq!(args.output, OutputFormat::Json);
}

#[test]
fn test_yaml_output() {
    let args = Cli::parse_from(["nd", "-o", "yaml", "net", "node-a"]);
    assert_eq!(args.output, OutputFormat::Yaml);
}

#[test]
fn test_context_flag() {
    let args = Cli::parse_from(["nd", "--context", "prod", "net", "node-a"]);
    assert_eq!(args.context.as_deref(), Some("prod"));
}

#[test]
fn test_verbose_count() {
    let args = Cli::parse_from(["nd", "-vv", "net", "node-a"]);
    assert_eq!(args.verbose, 2);
}

#[test]
fn test_missing_node_is_an_error() {
    assert!(Cli::try_parse_from(["nd", "networking"]).is_err());
    assert!(Cli::try_parse_from(["nd", "connectivity", "node-a"]).is_err());
}

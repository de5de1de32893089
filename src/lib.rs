//! netdiag - remote network diagnostics for Kubernetes nodes
//!
//! Routes low-level networking commands (interface and route inspection,
//! iptables dumps, conntrack dumps, ping, TCP and HTTP probes) to a debug
//! agent pod pinned to a target node, and parses the raw tool output into
//! structured records.

pub mod agent;
pub mod cli;
pub mod client;
pub mod cluster;
pub mod commands;
pub mod config;
pub mod diag;
pub mod error;
pub mod parse;
pub mod registry;
pub mod validate;

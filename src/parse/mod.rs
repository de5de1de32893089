//! Parsers for raw diagnostic tool output
//!
//! Each parser is a pure, total function from text to a structured record.
//! The upstream text is advisory diagnostic output, not a contract, so no
//! parser fails on malformed input; it degrades to a partial or empty
//! structure instead.

pub mod conntrack;
pub mod iptables;
pub mod ping;
pub mod probe;

pub use conntrack::{parse_conntrack, ConntrackEntry};
pub use iptables::{parse_iptables_save, IptablesChain, IptablesTable};
pub use ping::{parse_ping, PingResult};
pub use probe::{curl_write_format, parse_probe, ProbeTiming, RemoteEndpoint, TimedProbe};

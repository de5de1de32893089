//! Input validation grammars
//!
//! Caller-supplied identifiers end up as argv tokens handed to the remote
//! agent, so every one of them is held to a restrictive character-class
//! grammar before any network call. Rejection happens here; numeric ranges
//! are clamped by the operations instead, except hard protocol limits.

use crate::error::{NdError, Result};
use url::Url;

/// RFC 1123 DNS label: lowercase alphanumeric and hyphens, no leading or
/// trailing hyphen, at most 63 characters.
pub fn is_dns_label(s: &str) -> bool {
    if s.is_empty() || s.len() > 63 {
        return false;
    }

    let bytes = s.as_bytes();
    let inner_ok = bytes
        .iter()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'-');

    inner_ok && bytes[0] != b'-' && bytes[bytes.len() - 1] != b'-'
}

/// iptables chain name filter: uppercase identifier, `^[A-Z][A-Z0-9_-]*$`.
pub fn is_chain_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_uppercase() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_' || c == '-')
}

/// conntrack address filter: `^[a-zA-Z0-9.:/]+$` (IPv4, IPv6 or CIDR shapes).
pub fn is_conntrack_filter(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == ':' || c == '/')
}

/// Dotted-quad IPv4 shape: four groups of 1-3 digits.
pub fn is_ipv4(s: &str) -> bool {
    let octets: Vec<&str> = s.split('.').collect();
    octets.len() == 4
        && octets
            .iter()
            .all(|o| !o.is_empty() && o.len() <= 3 && o.chars().all(|c| c.is_ascii_digit()))
}

/// IPv6 shape: hex digits and colons, with at least one colon.
pub fn is_ipv6(s: &str) -> bool {
    !s.is_empty()
        && s.contains(':')
        && s.chars().all(|c| c.is_ascii_hexdigit() || c == ':')
}

/// Hostname shape: alphanumeric ends, dots and hyphens inside.
pub fn is_hostname(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.is_empty() {
        return false;
    }

    let inner_ok = bytes
        .iter()
        .all(|b| b.is_ascii_alphanumeric() || *b == b'.' || *b == b'-');

    inner_ok && bytes[0].is_ascii_alphanumeric() && bytes[bytes.len() - 1].is_ascii_alphanumeric()
}

/// Probe targets may be an IP address or a hostname, nothing else.
pub fn is_probe_target(s: &str) -> bool {
    is_ipv4(s) || is_ipv6(s) || is_hostname(s)
}

/// Parse and check a probe URL; only http and https are reachable from the
/// agent tier.
pub fn parse_probe_url(s: &str) -> Result<Url> {
    let url =
        Url::parse(s).map_err(|_| NdError::Validation("Invalid URL format".to_string()))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(NdError::Validation(
            "URL scheme must be http or https".to_string(),
        )),
    }
}

/// TCP port bound is a hard protocol limit, not a clamp.
pub fn check_port(port: u16) -> Result<u16> {
    if port == 0 {
        return Err(NdError::Validation(
            "Port must be an integer between 1 and 65535".to_string(),
        ));
    }
    Ok(port)
}

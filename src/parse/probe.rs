//! curl timing probe output parser
//!
//! The remote probe runs curl with a `-w` template that emits one JSON
//! object of string values. The template and the parser live together so the
//! two cannot drift apart.

use serde::{Deserialize, Serialize};

/// Parsed timing probe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimedProbe {
    pub status_code: i32,
    pub timing: ProbeTiming,
    pub remote: RemoteEndpoint,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeTiming {
    pub total_seconds: f64,
    pub dns_seconds: f64,
    pub connect_seconds: f64,
    pub tls_seconds: f64,
    pub first_byte_seconds: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteEndpoint {
    pub ip: Option<String>,
    pub port: Option<u16>,
}

/// The `-w` template handed to the remote curl invocation.
pub fn curl_write_format() -> String {
    serde_json::json!({
        "statusCode": "%{http_code}",
        "totalTime": "%{time_total}",
        "dnsTime": "%{time_namelookup}",
        "connectTime": "%{time_connect}",
        "tlsTime": "%{time_appconnect}",
        "startTransfer": "%{time_starttransfer}",
        "remoteIp": "%{remote_ip}",
        "remotePort": "%{remote_port}",
        "sizeDownload": "%{size_download}",
    })
    .to_string()
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProbe {
    #[serde(default)]
    status_code: String,
    #[serde(default)]
    total_time: String,
    #[serde(default)]
    dns_time: String,
    #[serde(default)]
    connect_time: String,
    #[serde(default)]
    tls_time: String,
    #[serde(default)]
    start_transfer: String,
    #[serde(default)]
    remote_ip: String,
    #[serde(default)]
    remote_port: String,
    #[serde(default)]
    size_download: String,
}

/// Parse the probe JSON. Returns `None` when the payload is not the
/// expected object at all; within a parsed object, malformed numeric fields
/// fall back to zero, except the remote port which falls back to absent.
pub fn parse_probe(stdout: &str) -> Option<TimedProbe> {
    let raw: RawProbe = serde_json::from_str(stdout.trim()).ok()?;

    Some(TimedProbe {
        status_code: raw.status_code.parse().unwrap_or(0),
        timing: ProbeTiming {
            total_seconds: raw.total_time.parse().unwrap_or(0.0),
            dns_seconds: raw.dns_time.parse().unwrap_or(0.0),
            connect_seconds: raw.connect_time.parse().unwrap_or(0.0),
            tls_seconds: raw.tls_time.parse().unwrap_or(0.0),
            first_byte_seconds: raw.start_transfer.parse().unwrap_or(0.0),
        },
        remote: RemoteEndpoint {
            ip: if raw.remote_ip.is_empty() {
                None
            } else {
                Some(raw.remote_ip)
            },
            port: raw.remote_port.parse().ok().filter(|p| *p != 0),
        },
        size_bytes: raw.size_download.parse().unwrap_or(0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_format_round_trips_keys() {
        let format = curl_write_format();
        // The template itself is valid JSON with curl placeholders as values.
        let value: serde_json::Value = serde_json::from_str(&format).unwrap();
        assert_eq!(value["statusCode"], "%{http_code}");
        assert_eq!(value["remotePort"], "%{remote_port}");
    }

    #[test]
    fn test_parse_full_probe() {
        let stdout = r#"{"statusCode":"200","totalTime":"0.142","dnsTime":"0.004","connectTime":"0.021","tlsTime":"0.087","startTransfer":"0.141","remoteIp":"10.0.12.4","remotePort":"443","sizeDownload":"612"}"#;
        let probe = parse_probe(stdout).unwrap();

        assert_eq!(probe.status_code, 200);
        assert_eq!(probe.timing.total_seconds, 0.142);
        assert_eq!(probe.timing.tls_seconds, 0.087);
        assert_eq!(probe.remote.ip.as_deref(), Some("10.0.12.4"));
        assert_eq!(probe.remote.port, Some(443));
        assert_eq!(probe.size_bytes, 612);
    }

    #[test]
    fn test_malformed_fields_fall_back() {
        let stdout = r#"{"statusCode":"","totalTime":"abc","remoteIp":"","remotePort":""}"#;
        let probe = parse_probe(stdout).unwrap();

        assert_eq!(probe.status_code, 0);
        assert_eq!(probe.timing.total_seconds, 0.0);
        assert!(probe.remote.ip.is_none());
        assert!(probe.remote.port.is_none());
        assert_eq!(probe.size_bytes, 0);
    }

    #[test]
    fn test_non_json_payload() {
        assert!(parse_probe("curl: (28) Connection timed out").is_none());
        assert!(parse_probe("").is_none());
    }
}

//! ping output parser

use serde::{Deserialize, Serialize};

/// Parsed ping run summary.
///
/// Round-trip fields are `None` whenever the statistics line is missing,
/// which includes every run that received zero packets; reporting zero there
/// would fake a real zero-latency measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PingResult {
    pub host: String,
    pub transmitted: u64,
    pub received: u64,
    pub loss_percent: f64,
    pub rtt_min: Option<f64>,
    pub rtt_avg: Option<f64>,
    pub rtt_max: Option<f64>,
}

impl Default for PingResult {
    fn default() -> Self {
        Self {
            host: String::new(),
            transmitted: 0,
            received: 0,
            // Absent data must not read as a healthy run.
            loss_percent: 100.0,
            rtt_min: None,
            rtt_avg: None,
            rtt_max: None,
        }
    }
}

/// Parse the text output of `ping`.
///
/// Handles both the Linux `rtt min/avg/max/mdev` and the BSD/busybox
/// `round-trip min/avg/max` statistics wording, and fractional loss
/// percentages.
pub fn parse_ping(output: &str) -> PingResult {
    let mut result = PingResult::default();

    for line in output.lines() {
        let line = line.trim();

        if result.host.is_empty() {
            if let Some(rest) = line.strip_prefix("PING ") {
                if let Some(host) = rest.split_whitespace().next() {
                    result.host = host.to_string();
                }
            }
        }

        if line.contains("packets transmitted") || line.contains("packet transmitted") {
            parse_summary_line(line, &mut result);
        }

        if (line.starts_with("rtt") || line.starts_with("round-trip"))
            && line.contains("min/avg/max")
        {
            parse_rtt_line(line, &mut result);
        }
    }

    result
}

/// `3 packets transmitted, 3 received, 0% packet loss, time 2004ms`
/// (some implementations say `3 packets received` and `0.0% packet loss`)
fn parse_summary_line(line: &str, result: &mut PingResult) {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    if let Some(first) = tokens.first() {
        if let Ok(transmitted) = first.parse() {
            result.transmitted = transmitted;
        }
    }

    for (idx, token) in tokens.iter().enumerate() {
        if token.starts_with("received") {
            // The count sits before "received", optionally with a
            // "packets" word in between ("3 received" vs "3 packets
            // received").
            let mut back = idx;
            while back > 0 {
                back -= 1;
                let candidate = tokens[back].trim_matches(',');
                if candidate == "packet" || candidate == "packets" {
                    continue;
                }
                if let Ok(received) = candidate.parse() {
                    result.received = received;
                }
                break;
            }
        }

        if let Some(percent) = token.strip_suffix('%') {
            if let Ok(loss) = percent.parse() {
                result.loss_percent = loss;
            }
        }
    }
}

/// `rtt min/avg/max/mdev = 0.123/0.456/0.789/0.012 ms`
fn parse_rtt_line(line: &str, result: &mut PingResult) {
    let Some((_, values)) = line.split_once('=') else {
        return;
    };

    let values = values.trim().trim_end_matches("ms").trim();
    let parts: Vec<&str> = values.split('/').collect();
    if parts.len() < 3 {
        return;
    }

    result.rtt_min = parts[0].trim().parse().ok();
    result.rtt_avg = parts[1].trim().parse().ok();
    result.rtt_max = parts[2].trim().parse().ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUCCESSFUL_PING: &str = "\
PING google.com (142.250.74.46) 56(84) bytes of data.
64 bytes from 142.250.74.46: icmp_seq=1 ttl=117 time=1.23 ms
64 bytes from 142.250.74.46: icmp_seq=2 ttl=117 time=1.18 ms
64 bytes from 142.250.74.46: icmp_seq=3 ttl=117 time=1.31 ms

--- google.com ping statistics ---
3 packets transmitted, 3 received, 0% packet loss, time 2004ms
rtt min/avg/max/mdev = 1.180/1.240/1.310/0.054 ms
";

    const FAILED_PING: &str = "\
PING 10.255.255.1 (10.255.255.1) 56(84) bytes of data.

--- 10.255.255.1 ping statistics ---
3 packets transmitted, 0 received, 100% packet loss, time 2031ms
";

    #[test]
    fn test_successful_ping() {
        let result = parse_ping(SUCCESSFUL_PING);

        assert_eq!(result.host, "google.com");
        assert_eq!(result.transmitted, 3);
        assert_eq!(result.received, 3);
        assert_eq!(result.loss_percent, 0.0);
        assert_eq!(result.rtt_min, Some(1.180));
        assert_eq!(result.rtt_avg, Some(1.240));
        assert_eq!(result.rtt_max, Some(1.310));
    }

    #[test]
    fn test_unreachable_target_has_no_rtt() {
        let result = parse_ping(FAILED_PING);

        assert_eq!(result.transmitted, 3);
        assert_eq!(result.received, 0);
        assert_eq!(result.loss_percent, 100.0);
        assert!(result.rtt_min.is_none());
        assert!(result.rtt_avg.is_none());
        assert!(result.rtt_max.is_none());
    }

    #[test]
    fn test_parse_is_idempotent() {
        assert_eq!(parse_ping(FAILED_PING), parse_ping(FAILED_PING));
    }

    #[test]
    fn test_busybox_round_trip_wording() {
        let output = "\
PING 10.0.0.1 (10.0.0.1): 56 data bytes

--- 10.0.0.1 ping statistics ---
3 packets transmitted, 3 packets received, 0% packet loss
round-trip min/avg/max = 0.310/0.420/0.560 ms
";
        let result = parse_ping(output);

        assert_eq!(result.received, 3);
        assert_eq!(result.rtt_min, Some(0.310));
        assert_eq!(result.rtt_max, Some(0.560));
    }

    #[test]
    fn test_fractional_loss() {
        let output = "\
PING host (1.2.3.4) 56(84) bytes of data.
--- host ping statistics ---
400 packets transmitted, 398 received, 0.5% packet loss, time 1999ms
";
        let result = parse_ping(output);
        assert_eq!(result.loss_percent, 0.5);
        assert_eq!(result.transmitted, 400);
        assert_eq!(result.received, 398);
    }

    #[test]
    fn test_empty_output_defaults() {
        let result = parse_ping("");
        assert_eq!(result.host, "");
        assert_eq!(result.transmitted, 0);
        assert_eq!(result.loss_percent, 100.0);
        assert!(result.rtt_min.is_none());
    }
}

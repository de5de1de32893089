//! conntrack -L output parser

use serde::{Deserialize, Serialize};

/// One connection-tracking entry.
///
/// The same keys (`src`, `dst`, `sport`, `dport`) appear twice per line,
/// once for the original flow and once for the reply. Direction is a
/// positional convention in the source text, not a labeled one: the second
/// `src=` occurrence starts the reply tuple.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConntrackEntry {
    pub protocol: String,
    pub protocol_number: String,
    pub ttl: String,
    /// Absent for stateless protocols such as UDP.
    pub state: Option<String>,
    pub src: Option<String>,
    pub dst: Option<String>,
    pub sport: Option<String>,
    pub dport: Option<String>,
    pub reply_src: Option<String>,
    pub reply_dst: Option<String>,
    pub reply_sport: Option<String>,
    pub reply_dport: Option<String>,
    pub mark: Option<String>,
}

/// Parse `conntrack -L` text, one entry per non-empty line. The version
/// banner line (`conntrack v...`) and short lines are skipped.
pub fn parse_conntrack(output: &str) -> Vec<ConntrackEntry> {
    let mut entries = Vec::new();

    for line in output.lines().filter(|l| !l.trim().is_empty()) {
        if line.starts_with("conntrack ") {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 4 {
            continue;
        }

        let mut entry = ConntrackEntry {
            protocol: fields[0].to_string(),
            protocol_number: fields[1].to_string(),
            ttl: fields[2].to_string(),
            ..Default::default()
        };

        // A bare token in position 3 is a state keyword (ESTABLISHED,
        // SYN_SENT, ...); key=value there means a stateless protocol.
        if !fields[3].contains('=') {
            entry.state = Some(fields[3].to_string());
        }

        let mut seen_src = false;
        let mut in_reply = false;

        for field in &fields[3..] {
            if field.starts_with('[') {
                // [ASSURED], [UNREPLIED]
                continue;
            }

            let Some((key, value)) = field.split_once('=') else {
                continue;
            };

            if key == "src" {
                if seen_src {
                    in_reply = true;
                }
                seen_src = true;
            }

            if in_reply {
                match key {
                    "src" => entry.reply_src = Some(value.to_string()),
                    "dst" => entry.reply_dst = Some(value.to_string()),
                    "sport" => entry.reply_sport = Some(value.to_string()),
                    "dport" => entry.reply_dport = Some(value.to_string()),
                    _ => {}
                }
            } else {
                match key {
                    "src" => entry.src = Some(value.to_string()),
                    "dst" => entry.dst = Some(value.to_string()),
                    "sport" => entry.sport = Some(value.to_string()),
                    "dport" => entry.dport = Some(value.to_string()),
                    "mark" => entry.mark = Some(value.to_string()),
                    _ => {}
                }
            }
        }

        entries.push(entry);
    }

    entries
}

//! Connection-tracking dump for a node

use crate::cluster::ExecResult;
use crate::diag::types::ConntrackReport;
use crate::diag::{argv, Diagnostics};
use crate::error::{NdError, Result};
use crate::parse::parse_conntrack;
use crate::validate;

const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 200;

impl Diagnostics {
    /// List conntrack entries on `node`, optionally filtered by address.
    ///
    /// A single-sided filter only matches one flow direction, so when a
    /// source-address filter returns nothing the query is re-issued once
    /// filtered by destination before giving up.
    pub async fn conntrack_entries(
        &self,
        node: &str,
        filter: Option<&str>,
        limit: Option<i64>,
    ) -> Result<ConntrackReport> {
        self.validate_node(node).await?;

        if let Some(filter) = filter {
            if !validate::is_conntrack_filter(filter) {
                return Err(NdError::Validation(
                    "Invalid filter. Must be an IP address or CIDR (letters, digits, '.', ':', '/')"
                        .to_string(),
                ));
            }
        }

        let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT) as usize;

        let mut command = argv(["conntrack", "-L"]);
        if let Some(filter) = filter {
            command.push("-s".to_string());
            command.push(filter.to_string());
        }

        let mut result = self.exec_on_node(node, &command).await?;
        let mut entries = parse_conntrack(&result.stdout);

        if entries.is_empty() {
            if let Some(filter) = filter {
                let retry_command = argv(["conntrack", "-L", "-d", filter]);
                let retry = self.exec_on_node(node, &retry_command).await?;
                entries = parse_conntrack(&retry.stdout);
                result = retry;
            }
        }

        let truncated = entries.len() > limit;
        entries.truncate(limit);

        Ok(ConntrackReport {
            node: node.to_string(),
            total: entries.len(),
            truncated,
            filter: filter.map(String::from),
            entries,
            exit_code: result.exit_code,
            stderr: conntrack_stderr(&result),
        })
    }
}

/// conntrack prints its entry-count summary on stderr; that banner is not
/// worth reporting as an error stream.
fn conntrack_stderr(result: &ExecResult) -> Option<String> {
    result
        .stderr_trimmed()
        .filter(|s| !s.contains("conntrack "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_stderr_suppressed() {
        let result = ExecResult {
            stdout: String::new(),
            stderr: "conntrack v1.4.6 (conntrack-tools): 42 flow entries have been shown.\n"
                .to_string(),
            exit_code: 0,
        };
        assert!(conntrack_stderr(&result).is_none());

        let real_error = ExecResult {
            stderr: "Operation failed: invalid parameter\n".to_string(),
            ..Default::default()
        };
        assert_eq!(
            conntrack_stderr(&real_error).as_deref(),
            Some("Operation failed: invalid parameter")
        );
    }
}

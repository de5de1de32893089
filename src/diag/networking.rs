//! Interface, address, route and rule dump for a node

use crate::diag::types::NodeNetworking;
use crate::diag::{argv, Diagnostics};
use crate::error::Result;
use serde_json::Value;

/// Delimits the four `ip -j` sub-command outputs inside one shell run. The
/// exec layer never invokes a shell itself, so the multi-step dump spells
/// one out explicitly and splits on this token afterwards.
const SECTION_SEPARATOR: &str = "---NETDIAG_SEPARATOR---";

impl Diagnostics {
    /// Collect interfaces, addresses, routes and routing rules from `node`.
    pub async fn node_networking(&self, node: &str) -> Result<NodeNetworking> {
        self.validate_node(node).await?;

        let sep = format!("echo '{SECTION_SEPARATOR}'");
        let script = [
            "ip -j link show",
            sep.as_str(),
            "ip -j addr show",
            sep.as_str(),
            "ip -j route show",
            sep.as_str(),
            "ip -j rule show",
        ]
        .join(" && ");

        let result = self
            .exec_on_node(node, &argv(["sh", "-c", script.as_str()]))
            .await?;

        let mut sections = result
            .stdout
            .split(SECTION_SEPARATOR)
            .map(|s| parse_section(s.trim()));

        Ok(NodeNetworking {
            node: node.to_string(),
            interfaces: sections.next().unwrap_or_else(empty_section),
            addresses: sections.next().unwrap_or_else(empty_section),
            routes: sections.next().unwrap_or_else(empty_section),
            rules: sections.next().unwrap_or_else(empty_section),
            exit_code: result.exit_code,
            stderr: result.stderr_trimmed(),
        })
    }
}

/// An `ip -j` section is JSON on any modern iproute2; keep the raw text when
/// it is not, rather than losing it.
fn parse_section(section: &str) -> Value {
    if section.is_empty() {
        return empty_section();
    }

    serde_json::from_str(section).unwrap_or_else(|_| Value::String(section.to_string()))
}

fn empty_section() -> Value {
    Value::Array(Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_section_json() {
        let value = parse_section(r#"[{"ifname":"eth0"}]"#);
        assert_eq!(value[0]["ifname"], "eth0");
    }

    #[test]
    fn test_parse_section_falls_back_to_raw_text() {
        let value = parse_section("ip: command not found");
        assert_eq!(value, Value::String("ip: command not found".to_string()));
    }

    #[test]
    fn test_empty_section_is_empty_array() {
        assert_eq!(parse_section(""), Value::Array(Vec::new()));
    }
}

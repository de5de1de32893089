//! iptables rule dump for a node

use crate::diag::types::{FirewallRules, FirewallTable};
use crate::diag::{argv, Diagnostics};
use crate::error::{NdError, Result};
use crate::parse::parse_iptables_save;
use crate::validate;

impl Diagnostics {
    /// Dump one iptables table from `node`, optionally filtered to a single
    /// chain, for IPv4 or IPv6.
    pub async fn firewall_rules(
        &self,
        node: &str,
        table: FirewallTable,
        chain: Option<&str>,
        ipv6: bool,
    ) -> Result<FirewallRules> {
        self.validate_node(node).await?;

        if let Some(chain) = chain {
            if !validate::is_chain_name(chain) {
                return Err(NdError::Validation(
                    "Invalid chain name. Must be an uppercase identifier (A-Z, 0-9, _, -)"
                        .to_string(),
                ));
            }
        }

        let cmd = if ipv6 { "ip6tables-save" } else { "iptables-save" };
        let result = self
            .exec_on_node(node, &argv([cmd, "-t", table.as_str()]))
            .await?;

        let mut parsed = parse_iptables_save(&result.stdout);
        if let Some(chain) = chain {
            parsed.chains.retain(|c| c.name == chain);
        }

        Ok(FirewallRules {
            node: node.to_string(),
            ip_version: if ipv6 { 6 } else { 4 },
            table: parsed.table,
            chains: parsed.chains,
            exit_code: result.exit_code,
            stderr: result.stderr_trimmed(),
        })
    }
}

//! iptables-save / ip6tables-save output parser

use serde::{Deserialize, Serialize};

/// One chain within a table. `policy` is `None` for custom chains, which
/// have no default policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IptablesChain {
    pub name: String,
    pub policy: Option<String>,
    pub rules: Vec<String>,
}

/// A parsed table dump. Chains appear in first-seen order; rule order within
/// a chain matches the source, since evaluation order matters operationally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IptablesTable {
    pub table: String,
    pub chains: Vec<IptablesChain>,
}

/// Parse `iptables-save` text.
///
/// `*name` sets the table, `:CHAIN POLICY [pkts:bytes]` declares a chain
/// (`-` mapping to no policy), `-A CHAIN rule...` appends a rule and creates
/// the chain on demand if it was never declared. Everything else, notably
/// `COMMIT` and comments, is ignored.
pub fn parse_iptables_save(output: &str) -> IptablesTable {
    let mut table = "unknown".to_string();
    let mut chains: Vec<IptablesChain> = Vec::new();

    for line in output.lines().filter(|l| !l.trim().is_empty()) {
        if let Some(name) = line.strip_prefix('*') {
            table = name.trim().to_string();
        } else if let Some(decl) = line.strip_prefix(':') {
            let mut parts = decl.split_whitespace();
            if let (Some(name), Some(policy)) = (parts.next(), parts.next()) {
                let policy = if policy == "-" {
                    None
                } else {
                    Some(policy.to_string())
                };

                // A re-declaration supersedes the earlier one in place;
                // chain names stay unique within a table.
                match chains.iter_mut().find(|c| c.name == name) {
                    Some(existing) => {
                        existing.policy = policy;
                        existing.rules.clear();
                    }
                    None => chains.push(IptablesChain {
                        name: name.to_string(),
                        policy,
                        rules: Vec::new(),
                    }),
                }
            }
        } else if let Some(rest) = line.strip_prefix("-A ") {
            let (chain_name, rule) = match rest.split_once(' ') {
                Some((name, rule)) => (name, rule.to_string()),
                None => (rest, String::new()),
            };

            let idx = match chains.iter().position(|c| c.name == chain_name) {
                Some(idx) => idx,
                None => {
                    chains.push(IptablesChain {
                        name: chain_name.to_string(),
                        policy: None,
                        rules: Vec::new(),
                    });
                    chains.len() - 1
                }
            };
            chains[idx].rules.push(rule);
        }
    }

    IptablesTable { table, chains }
}

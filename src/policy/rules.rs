use crate::net::{AddressRule, parse_hosts};

/// One side (allowed or banned) of an ACL
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuleSet {
    /// Interface names, matched exactly
    pub interfaces: Vec<String>,
    /// Literal address and CIDR rules
    pub addresses: Vec<AddressRule>,
    /// Hostnames resolved on every decision
    pub hosts: Vec<String>,
}

impl RuleSet {
    /// Create an empty rule set
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a rule set from interface names and raw host tokens
    pub fn from_entries(interfaces: &[String], hosts: &[String]) -> Self {
        let host_rules = parse_hosts(hosts);
        let mut rules = Self {
            interfaces: Vec::with_capacity(interfaces.len()),
            addresses: host_rules.addresses,
            hosts: host_rules.hosts,
        };
        for iface in interfaces {
            rules.add_interface(iface.clone());
        }
        rules
    }

    /// Add interface name (duplicates are automatically eliminated)
    pub fn add_interface(&mut self, name: String) {
        if !self.interfaces.contains(&name) {
            self.interfaces.push(name);
        }
    }

    /// Add address rule (duplicates are automatically eliminated)
    pub fn add_address(&mut self, rule: AddressRule) {
        if !self.addresses.contains(&rule) {
            self.addresses.push(rule);
        }
    }

    /// Add hostname (duplicates are automatically eliminated)
    pub fn add_host(&mut self, host: String) {
        if !self.hosts.contains(&host) {
            self.hosts.push(host);
        }
    }

    /// Merge another rule set
    pub fn merge(&mut self, other: Self) {
        for iface in other.interfaces {
            self.add_interface(iface);
        }
        for rule in other.addresses {
            self.add_address(rule);
        }
        for host in other.hosts {
            self.add_host(host);
        }
    }

    /// True when neither addresses nor hosts are present, i.e. nothing can match
    pub fn has_no_targets(&self) -> bool {
        self.addresses.is_empty() && self.hosts.is_empty()
    }
}

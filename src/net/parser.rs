use std::{
    collections::HashSet,
    fmt,
    net::IpAddr,
    str::FromStr,
};

use ipnet::{IpNet, Ipv4Net};

use super::interface::NetworkInterface;
use crate::error::AclError;

/// A literal address or CIDR block, optionally scoped to an interface zone
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AddressRule {
    net: IpNet,
    /// Interface name or index the rule is scoped to (`fe80::1%eth0`)
    zone: Option<String>,
    /// Written as a bare address rather than a block
    single: bool,
}

impl AddressRule {
    /// Check whether `addr`, observed on `iface`, falls inside this rule
    ///
    /// Zoned rules additionally require the interface to be known and to match
    /// the zone by name or index. IPv4-mapped IPv6 candidates are compared as IPv4.
    pub fn contains(&self, addr: IpAddr, iface: Option<&NetworkInterface>) -> bool {
        if !self.net.contains(&addr.to_canonical()) {
            return false;
        }

        match &self.zone {
            None => true,
            Some(zone) => iface.is_some_and(|iface| iface.matches_zone(zone)),
        }
    }
}

impl From<IpAddr> for AddressRule {
    fn from(addr: IpAddr) -> Self {
        Self {
            net: IpNet::from(addr.to_canonical()),
            zone: None,
            single: true,
        }
    }
}

impl FromStr for AddressRule {
    type Err = AclError;

    /// Parse forms like "10.0.0.1", "10.0.0.0/24", "fe80::1%eth0", "fe80::/64%2"
    /// and "fe80::%eth0/64"
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = || AclError::InvalidAddress {
            input: input.to_string(),
        };

        let (literal, zone) = match input.split_once('%') {
            None => (input.to_string(), None),
            Some((addr, rest)) => match rest.split_once('/') {
                Some((zone, prefix)) => (format!("{addr}/{prefix}"), Some(zone.to_string())),
                None => (addr.to_string(), Some(rest.to_string())),
            },
        };

        if zone.as_deref().is_some_and(str::is_empty) {
            return Err(invalid());
        }

        let (net, single) = if literal.contains('/') {
            let net = literal.parse::<IpNet>().map_err(|_| invalid())?;
            (unmap_ipv4_block(net).ok_or_else(invalid)?, false)
        } else {
            (IpNet::from(literal.parse::<IpAddr>().map_err(|_| invalid())?.to_canonical()), true)
        };

        // zones only scope IPv6 addresses
        if zone.is_some() && matches!(net, IpNet::V4(_)) {
            return Err(invalid());
        }

        Ok(Self { net, zone, single })
    }
}

/// Rewrite a block inside `::ffff:0:0/96` as the IPv4 block it covers
///
/// Candidates are compared in canonical form, so an IPv4-mapped block left as
/// IPv6 could never contain anything. Returns `None` for mapped blocks wider
/// than `/96`, which have no IPv4 equivalent.
fn unmap_ipv4_block(net: IpNet) -> Option<IpNet> {
    let IpNet::V6(v6) = net else {
        return Some(net);
    };
    let Some(v4) = v6.addr().to_ipv4_mapped() else {
        return Some(net);
    };
    let prefix = v6.prefix_len().checked_sub(96)?;
    Ipv4Net::new(v4, prefix).ok().map(IpNet::V4)
}

impl fmt::Display for AddressRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.single {
            write!(f, "{}", self.net.addr())?;
        } else {
            write!(f, "{}", self.net)?;
        }
        if let Some(zone) = &self.zone {
            write!(f, "%{zone}")?;
        }
        Ok(())
    }
}

/// Host tokens split into literal address rules and symbolic hostnames
#[derive(Default, Debug, PartialEq)]
pub struct HostRules {
    /// Address and CIDR rules
    pub addresses: Vec<AddressRule>,
    /// Tokens that did not parse as an address, resolved at match time
    pub hosts: Vec<String>,
}

/// Classify configured host tokens
///
/// Every token that parses as an address or CIDR block becomes an
/// [`AddressRule`]; anything else is kept verbatim as a hostname. No check is
/// made that a hostname is syntactically valid. Blank tokens are skipped and
/// duplicates dropped, keeping first-seen order.
///
/// # Examples
/// ```
/// use netacl::net::parser::parse_hosts;
///
/// let entries = vec!["10.0.0.0/24".to_string(), "example.com".to_string()];
/// let rules = parse_hosts(&entries);
/// assert_eq!(rules.addresses.len(), 1);
/// assert_eq!(rules.hosts, vec!["example.com".to_string()]);
/// ```
pub fn parse_hosts(entries: &[String]) -> HostRules {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut rules = HostRules::default();

    for raw in entries {
        let trimmed = raw.trim();
        if trimmed.is_empty() || !seen.insert(trimmed) {
            continue;
        }

        match trimmed.parse::<AddressRule>() {
            Ok(rule) => {
                log::trace!("host entry {trimmed} classified as address {rule}");
                rules.addresses.push(rule);
            }
            Err(_) => {
                log::trace!("host entry {trimmed} classified as hostname");
                rules.hosts.push(trimmed.to_string());
            }
        }
    }

    rules
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn entries(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[rstest]
    #[case(vec!["192.168.1.1"], 1, 0, "single IPv4 address")]
    #[case(vec!["10.0.0.0/24"], 1, 0, "IPv4 CIDR")]
    #[case(vec!["2001:db8::1"], 1, 0, "IPv6 address")]
    #[case(vec!["2001:db8::/32"], 1, 0, "IPv6 CIDR")]
    #[case(vec!["fe80::1%eth0"], 1, 0, "zoned IPv6 address")]
    #[case(vec!["fe80::/64%eth0"], 1, 0, "zoned IPv6 block")]
    #[case(vec!["example.com"], 0, 1, "hostname")]
    #[case(vec!["localhost", "sub.example.com"], 0, 2, "multiple hostnames")]
    #[case(vec!["10.0.0.0/24", "example.com"], 1, 1, "mixed")]
    #[case(vec!["999.999.999.999"], 0, 1, "invalid IP treated as hostname")]
    #[case(vec!["10.0.0.0/33"], 0, 1, "prefix too long treated as hostname")]
    #[case(vec!["10.0.0.1%eth0"], 0, 1, "zoned IPv4 treated as hostname")]
    #[case(vec!["fe80::1%"], 0, 1, "empty zone treated as hostname")]
    #[case(vec!["::ffff:10.0.0.0/104"], 1, 0, "IPv4-mapped block")]
    #[case(vec!["::ffff:0.0.0.0/95"], 0, 1, "mapped block wider than /96 treated as hostname")]
    #[case(vec!["10.0.0.1", "10.0.0.1", "a.example", "a.example"], 1, 1, "duplicates dropped")]
    #[case(vec!["", "  ", "\t"], 0, 0, "blank entries skipped")]
    #[case(vec!["  10.0.0.1  ", "  example.com "], 1, 1, "surrounding whitespace trimmed")]
    #[case(vec![], 0, 0, "empty list")]
    fn test_parse_hosts_classification(
        #[case] values: Vec<&str>,
        #[case] expected_addresses: usize,
        #[case] expected_hosts: usize,
        #[case] _description: &str,
    ) {
        let rules = parse_hosts(&entries(&values));
        assert_eq!(rules.addresses.len(), expected_addresses);
        assert_eq!(rules.hosts.len(), expected_hosts);
    }

    #[test]
    fn test_cidr_is_address_and_domain_is_host() {
        let rules = parse_hosts(&entries(&["10.0.0.0/24", "example.com"]));
        assert_eq!(rules.addresses[0], "10.0.0.0/24".parse::<AddressRule>().unwrap());
        assert_eq!(rules.hosts, vec!["example.com".to_string()]);
    }

    #[test]
    fn test_parse_keeps_first_seen_order() {
        let rules = parse_hosts(&entries(&["b.example", "10.0.0.2", "a.example", "10.0.0.1"]));
        assert_eq!(rules.hosts, entries(&["b.example", "a.example"]));
        let rendered: Vec<String> = rules.addresses.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, entries(&["10.0.0.2", "10.0.0.1"]));
    }

    #[rstest]
    #[case("10.0.0.1", "10.0.0.1")]
    #[case("10.0.0.0/24", "10.0.0.0/24")]
    #[case("10.0.0.5/24", "10.0.0.5/24")]
    #[case("10.0.0.1/32", "10.0.0.1/32")]
    #[case("fe80::1%eth0", "fe80::1%eth0")]
    #[case("fe80::%eth0/64", "fe80::/64%eth0")]
    #[case("::ffff:10.0.0.0/104", "10.0.0.0/8")]
    fn test_address_rule_display(#[case] input: &str, #[case] expected: &str) {
        let rule: AddressRule = input.parse().unwrap();
        assert_eq!(rule.to_string(), expected);
    }

    #[rstest]
    #[case("192.168.1.0/24", "192.168.1.42", true, "inside block")]
    #[case("192.168.1.0/24", "192.168.2.1", false, "outside block")]
    #[case("10.0.0.5/24", "10.0.0.200", true, "host bits ignored for containment")]
    #[case("10.0.0.1", "10.0.0.1", true, "exact address")]
    #[case("10.0.0.1", "10.0.0.2", false, "different address")]
    #[case("0.0.0.0/0", "8.8.8.8", true, "IPv4 default route")]
    #[case("0.0.0.0/0", "::1", false, "IPv6 candidate against IPv4 rule")]
    #[case("2001:db8::/32", "2001:db8::42", true, "IPv6 block")]
    #[case("10.0.0.0/8", "::ffff:10.1.2.3", true, "IPv4-mapped candidate")]
    #[case("::ffff:10.0.0.0/104", "::ffff:10.0.0.1", true, "mapped block, mapped candidate")]
    #[case("::ffff:10.0.0.0/104", "10.0.0.1", true, "mapped block, IPv4 candidate")]
    #[case("::ffff:10.0.0.0/104", "11.0.0.1", false, "mapped block, outside")]
    #[case("::ffff:10.0.0.1", "10.0.0.1", true, "mapped single address")]
    fn test_address_rule_contains_unscoped(
        #[case] rule: &str,
        #[case] addr: &str,
        #[case] expected: bool,
        #[case] _description: &str,
    ) {
        let rule: AddressRule = rule.parse().unwrap();
        let addr: IpAddr = addr.parse().unwrap();
        assert_eq!(rule.contains(addr, None), expected);
    }

    #[test]
    fn test_zoned_rule_requires_matching_interface() {
        let rule: AddressRule = "fe80::/64%eth0".parse().unwrap();
        let addr: IpAddr = "fe80::1234".parse().unwrap();
        let eth0 = NetworkInterface::new(2, "eth0");
        let eth1 = NetworkInterface::new(3, "eth1");

        assert!(rule.contains(addr, Some(&eth0)));
        assert!(!rule.contains(addr, Some(&eth1)));
        assert!(!rule.contains(addr, None));
    }

    #[test]
    fn test_zoned_rule_matches_interface_index() {
        let rule: AddressRule = "fe80::1%3".parse().unwrap();
        let addr: IpAddr = "fe80::1".parse().unwrap();

        assert!(rule.contains(addr, Some(&NetworkInterface::new(3, "wlan0"))));
        assert!(!rule.contains(addr, Some(&NetworkInterface::new(4, "wlan1"))));
    }

    #[test]
    fn test_resolved_address_rule_is_single_host() {
        let rule = AddressRule::from("93.184.216.34".parse::<IpAddr>().unwrap());
        assert_eq!(rule, "93.184.216.34".parse::<AddressRule>().unwrap());
        assert!(rule.contains("93.184.216.34".parse().unwrap(), None));
        assert!(!rule.contains("93.184.216.35".parse().unwrap(), None));
        assert_eq!(rule.to_string(), "93.184.216.34");
    }
}

use std::{fmt, net::IpAddr, path::Path, sync::Arc};

use crate::{
    cli::ConfigFile,
    error::AclError,
    net::{DnsResolver, NetworkInterface, SystemDnsResolver},
};

use super::{
    matcher::{match_address, match_host, match_interface},
    rules::RuleSet,
};

/// Configuration file read by [`Acl::from_default_config`]
pub const DEFAULT_CONFIG_FILENAME: &str = "network.toml";

/// Allow/ban rule sets and the decision function over them
///
/// Nothing is allowed by default. An empty allowed interface list lets every
/// interface through, while empty allowed addresses and hosts deny everything.
/// A banned address or host always wins over an allow match.
///
/// The ACL is never mutated after construction and can be shared between
/// tasks behind an `Arc`.
pub struct Acl<R = SystemDnsResolver> {
    pub allowed: RuleSet,
    pub banned: RuleSet,
    resolver: Arc<R>,
}

impl Acl<SystemDnsResolver> {
    /// Create an ACL that resolves hostnames with the system resolver
    pub fn new(allowed: RuleSet, banned: RuleSet) -> Self {
        Self::with_resolver(allowed, banned, SystemDnsResolver)
    }

    /// Load the ACL from a TOML configuration file
    pub fn from_config_file(path: &Path) -> Result<Self, AclError> {
        let (allowed, banned) = ConfigFile::load(path)?.to_rules();
        Ok(Self::new(allowed, banned))
    }

    /// Load the ACL from [`DEFAULT_CONFIG_FILENAME`] in the working directory
    pub fn from_default_config() -> Result<Self, AclError> {
        Self::from_config_file(Path::new(DEFAULT_CONFIG_FILENAME))
    }
}

impl<R: DnsResolver> Acl<R> {
    /// Create an ACL resolving hostnames through `resolver`
    pub fn with_resolver(allowed: RuleSet, banned: RuleSet, resolver: R) -> Self {
        Self {
            allowed,
            banned,
            resolver: Arc::new(resolver),
        }
    }

    /// Decide whether `addr`, arriving on `iface`, is permitted
    ///
    /// Evaluated in order, short-circuiting:
    /// 1. the interface is allowed, or no allowed interfaces are configured
    /// 2. the address matches an allowed address or an allowed host
    /// 3. the address matches no banned address
    /// 4. the address matches no banned host
    ///
    /// Banned interfaces are not consulted. A `None` interface only fails
    /// checks that need one. Never fails; unresolvable rules simply don't match.
    pub async fn is_allowed(&self, iface: Option<&NetworkInterface>, addr: IpAddr) -> bool {
        let allowed = (self.allowed.interfaces.is_empty()
            || match_interface(iface, &self.allowed.interfaces))
            && (match_address(iface, addr, &self.allowed.addresses)
                || match_host(&self.resolver, iface, addr, &self.allowed.hosts).await)
            && !match_address(iface, addr, &self.banned.addresses)
            && !match_host(&self.resolver, iface, addr, &self.banned.hosts).await;

        log::debug!("is_allowed(iface={iface:?}, addr={addr}) = {allowed}");
        allowed
    }

    /// String form of [`Acl::is_allowed`]
    ///
    /// An unknown interface name is treated as no interface and an
    /// unparsable address is denied.
    pub async fn is_allowed_str(&self, iface: &str, addr: &str) -> bool {
        let iface = NetworkInterface::by_name(iface)
            .inspect_err(|err| log::debug!("Treating as no interface: {err}"))
            .ok();

        let Ok(addr) = addr
            .parse::<IpAddr>()
            .inspect_err(|err| log::debug!("Denying '{addr}': {err}"))
        else {
            return false;
        };

        self.is_allowed(iface.as_ref(), addr).await
    }
}

impl<R> fmt::Display for Acl<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (side, rules) in [("Allowed", &self.allowed), ("Banned", &self.banned)] {
            let addresses: Vec<String> = rules.addresses.iter().map(ToString::to_string).collect();
            writeln!(f, "{side}Interfaces: {}", rules.interfaces.join(", "))?;
            writeln!(f, "{side}Addresses: {}", addresses.join(", "))?;
            writeln!(f, "{side}Hosts: {}", rules.hosts.join(", "))?;
        }
        Ok(())
    }
}

impl<R> fmt::Debug for Acl<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Acl")
            .field("allowed", &self.allowed)
            .field("banned", &self.banned)
            .finish_non_exhaustive()
    }
}

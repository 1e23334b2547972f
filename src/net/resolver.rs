use std::net::IpAddr;

use async_trait::async_trait;
use hickory_resolver::Resolver;

#[cfg(test)]
use mockall::automock;

use crate::error::AclError;

/// DNS resolver abstraction for testing
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DnsResolver: Send + Sync + 'static {
    async fn lookup_host(&self, host: &str) -> Result<Vec<IpAddr>, AclError>;
}

/// Production DNS resolver using the system resolver
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemDnsResolver;

#[async_trait]
impl DnsResolver for SystemDnsResolver {
    /// Resolve a hostname to all of its IPv4 and IPv6 addresses
    ///
    /// A fresh resolver is built from the system configuration on every call
    /// with its answer cache disabled, so each decision sees current DNS data.
    ///
    /// # Examples
    /// ```no_run
    /// use netacl::net::{DnsResolver, SystemDnsResolver};
    ///
    /// # async fn example() {
    /// let addrs = SystemDnsResolver.lookup_host("example.com").await.unwrap();
    /// # }
    /// ```
    async fn lookup_host(&self, host: &str) -> Result<Vec<IpAddr>, AclError> {
        let mut builder =
            Resolver::builder_tokio().map_err(|source| AclError::DnsResolverInit { source })?;
        builder.options_mut().cache_size = 0;
        let resolver = builder.build();

        let response = resolver
            .lookup_ip(host)
            .await
            .map_err(|source| AclError::DnsLookup {
                host: host.to_string(),
                source,
            })?;

        Ok(response.iter().collect())
    }
}

use std::{
    net::IpAddr,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use tokio::task::JoinSet;

use crate::net::{AddressRule, DnsResolver, NetworkInterface};

/// Exact, case-sensitive match of the interface name against `names`
pub fn match_interface(iface: Option<&NetworkInterface>, names: &[String]) -> bool {
    let matched = iface.is_some_and(|iface| names.iter().any(|name| *name == iface.name));
    log::debug!("match_interface(iface={iface:?}, names={names:?}) = {matched}");
    matched
}

/// True if any rule contains `addr` as seen on `iface`
pub fn match_address(
    iface: Option<&NetworkInterface>,
    addr: IpAddr,
    rules: &[AddressRule],
) -> bool {
    let matched = rules.iter().any(|rule| rule.contains(addr, iface));
    log::debug!("match_address(iface={iface:?}, addr={addr}, rules={rules:?}) = {matched}");
    matched
}

/// Resolve every hostname concurrently and test the answers against `addr`
///
/// One task is spawned per hostname. Each task raises a shared flag when one of
/// its resolved addresses contains `addr`; lookup failures are ignored.
///
/// # Behavior
/// - Returns `true` as soon as any finished task has raised the flag; tasks
///   still running are aborted when the set is dropped
/// - Returns `false` only after every task has completed
/// - Performs one lookup per hostname per call, nothing is cached
pub async fn match_host<R: DnsResolver>(
    resolver: &Arc<R>,
    iface: Option<&NetworkInterface>,
    addr: IpAddr,
    hosts: &[String],
) -> bool {
    if hosts.is_empty() {
        return false;
    }

    let matched = Arc::new(AtomicBool::new(false));
    let mut lookups = JoinSet::new();

    for host in hosts {
        let resolver = Arc::clone(resolver);
        let matched = Arc::clone(&matched);
        let host = host.clone();
        let iface = iface.cloned();

        lookups.spawn(async move {
            let resolved = match resolver.lookup_host(&host).await {
                Ok(resolved) => resolved,
                Err(err) => {
                    log::debug!("Ignoring lookup failure for {host}: {err}");
                    return;
                }
            };

            let hit = resolved
                .into_iter()
                .any(|ip| AddressRule::from(ip).contains(addr, iface.as_ref()));
            if hit {
                log::debug!("Host {host} resolves to {addr}");
                matched.fetch_or(true, Ordering::AcqRel);
            }
        });
    }

    while let Some(joined) = lookups.join_next().await {
        if let Err(err) = joined {
            log::warn!("Host lookup task failed: {err}");
        }
        if matched.load(Ordering::Acquire) {
            return true;
        }
    }

    let matched = matched.load(Ordering::Acquire);
    log::debug!("match_host(iface={iface:?}, addr={addr}, hosts={hosts:?}) = {matched}");
    matched
}

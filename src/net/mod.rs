pub mod interface;
pub mod parser;
pub mod resolver;

// Re-export main types and functions
pub use interface::NetworkInterface;
pub use parser::{AddressRule, HostRules, parse_hosts};
pub use resolver::{DnsResolver, SystemDnsResolver};

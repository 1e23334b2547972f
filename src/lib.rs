pub mod cli;
pub mod error;
pub mod net;
pub mod policy;

pub use error::AclError;
pub use net::NetworkInterface;
pub use policy::{Acl, DEFAULT_CONFIG_FILENAME, RuleSet};

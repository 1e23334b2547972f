pub mod acl;
pub mod matcher;
pub mod rules;

pub use acl::{Acl, DEFAULT_CONFIG_FILENAME};
pub use rules::RuleSet;

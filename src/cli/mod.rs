pub mod args;
pub mod config;
pub mod loader;

pub use args::Args;
pub use config::{ConfigFile, RuleConfig};
pub use loader::AclLoader;

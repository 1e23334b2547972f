use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{error::AclError, policy::RuleSet};

#[derive(Debug, Deserialize, Serialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub allowed: RuleConfig,
    #[serde(default)]
    pub banned: RuleConfig,
}

#[derive(Debug, Deserialize, Serialize, Default)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    /// Network interface names
    #[serde(default)]
    pub interfaces: Vec<String>,
    /// IP addresses, CIDR blocks or hostnames
    #[serde(default)]
    pub hosts: Vec<String>,
}

impl RuleConfig {
    fn to_rules(&self) -> RuleSet {
        RuleSet::from_entries(&self.interfaces, &self.hosts)
    }
}

impl ConfigFile {
    /// Load configuration file
    pub fn load(path: &Path) -> Result<Self, AclError> {
        let content = fs::read_to_string(path).map_err(|source| AclError::ConfigRead {
            path: PathBuf::from(path),
            source,
        })?;
        toml::from_str(&content).map_err(|source| AclError::ConfigParse {
            path: PathBuf::from(path),
            source,
        })
    }

    /// Build the (allowed, banned) rule sets from configuration file
    pub fn to_rules(&self) -> (RuleSet, RuleSet) {
        (self.allowed.to_rules(), self.banned.to_rules())
    }
}

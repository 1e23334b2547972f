use crate::error::AclError;
use crate::policy::{Acl, RuleSet};

use super::args::Args;
use super::config::ConfigFile;

/// Load the ACL from the config file and merge rules given on the command line
pub struct AclLoader;

impl AclLoader {
    /// Load complete ACL from CLI arguments
    pub fn load(args: &Args) -> Result<Acl, AclError> {
        let (mut allowed, mut banned) = ConfigFile::load(&args.config)?.to_rules();

        allowed.merge(RuleSet::from_entries(&args.allow_interface, &args.allow_host));
        banned.merge(RuleSet::from_entries(&[], &args.ban_host));

        if allowed.has_no_targets() {
            log::warn!("No allowed addresses or hosts configured, every address will be denied");
        }

        Ok(Acl::new(allowed, banned))
    }
}

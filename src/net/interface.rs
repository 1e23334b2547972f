use nix::net::if_::if_nametoindex;

use crate::error::AclError;

/// A network interface as reported by the OS
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NetworkInterface {
    pub index: u32,
    pub name: String,
}

impl NetworkInterface {
    pub fn new(index: u32, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
        }
    }

    /// Look up an interface by name
    ///
    /// # Returns
    /// * `Ok(NetworkInterface)` - The interface with its OS index
    /// * `Err(AclError::InterfaceLookup)` - If no interface has this name
    pub fn by_name(name: &str) -> Result<Self, AclError> {
        let index = if_nametoindex(name).map_err(|source| AclError::InterfaceLookup {
            name: name.to_string(),
            source,
        })?;
        Ok(Self::new(index, name))
    }

    /// Whether an IPv6 zone identifier (name or numeric index) refers to this interface
    pub fn matches_zone(&self, zone: &str) -> bool {
        self.name == zone || zone.parse::<u32>().is_ok_and(|index| index == self.index)
    }
}

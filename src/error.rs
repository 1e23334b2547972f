use thiserror::Error;

use std::path::PathBuf;

use hickory_resolver::ResolveError;

#[derive(Debug, Error)]
pub enum AclError {
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to initialize DNS resolver: {source}")]
    DnsResolverInit {
        #[source]
        source: ResolveError,
    },

    #[error("failed to resolve host {host}: {source}")]
    DnsLookup {
        host: String,
        #[source]
        source: ResolveError,
    },

    #[error("network interface {name} not found: {source}")]
    InterfaceLookup {
        name: String,
        #[source]
        source: nix::Error,
    },

    #[error("invalid IP address '{input}'")]
    InvalidAddress { input: String },
}

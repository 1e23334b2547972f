use std::path::PathBuf;

use clap::Parser;

use crate::policy::DEFAULT_CONFIG_FILENAME;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Check whether an address on a network interface is allowed by an ACL"
)]
pub struct Args {
    /// Path to configuration file (TOML)
    #[arg(long = "config", value_name = "PATH", default_value = DEFAULT_CONFIG_FILENAME)]
    pub config: PathBuf,

    /// Additionally allow the specified interface names
    #[arg(long = "allow-interface", value_delimiter = ',')]
    pub allow_interface: Vec<String>,

    /// Additionally allow the specified hosts (IP, CIDR or hostname)
    #[arg(long = "allow-host", value_delimiter = ',')]
    pub allow_host: Vec<String>,

    /// Additionally ban the specified hosts (IP, CIDR or hostname)
    #[arg(long = "ban-host", value_delimiter = ',')]
    pub ban_host: Vec<String>,

    /// Do not print the loaded rules
    #[arg(short, long)]
    pub quiet: bool,

    /// Address to check
    #[arg(value_name = "ADDRESS")]
    pub address: String,

    /// Interface the address was seen on
    #[arg(value_name = "INTERFACE")]
    pub interface: Option<String>,
}

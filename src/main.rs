use clap::Parser;
use netacl::{
    cli::{AclLoader, Args},
    error::AclError,
};

#[tokio::main]
async fn main() -> Result<(), AclError> {
    env_logger::init();

    let args = Args::parse();

    let acl = AclLoader::load(&args)?;
    if !args.quiet {
        print!("{acl}");
    }

    let iface = args.interface.as_deref().unwrap_or_default();
    let allowed = acl.is_allowed_str(iface, &args.address).await;
    println!("{allowed}");

    std::process::exit(if allowed { 0 } else { 1 });
}

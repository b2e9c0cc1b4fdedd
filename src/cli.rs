use clap::Parser;

/// Provision a single-user testbed notebook container on first boot
#[derive(Parser, Debug)]
#[command(name = "notebook-init", version = crate::version::VERSION, about)]
pub struct Cli {}

#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;

use notebook_init::cli::Cli;
use notebook_init::external::Capabilities;
use notebook_init::init;
use notebook_init::settings::Settings;

fn main() -> Result<()> {
    let _cli = Cli::parse();

    let settings = Settings::from_env();
    let capabilities = Capabilities::production();

    init::run(&settings, &capabilities);

    Ok(())
}

//! The idempotent initialization pipeline.
//!
//! Steps run in a fixed order; each one is guarded by an existence check
//! where the artifact must survive restarts, and every failure is logged
//! and contained so later steps still run.

use crate::artifacts::env_file::EnvFile;
use crate::artifacts::manifest::ExamplesManifest;
use crate::artifacts::token::TokenRecord;
use crate::artifacts::{requirements, ssh_config};
use crate::content;
use crate::error::{InitError, Result};
use crate::external::Capabilities;
use crate::keys;
use crate::permissions;
use crate::settings::{vars, Settings, DEFAULT_LOG_FILE, DEFAULT_LOG_LEVEL};
use std::fs;

/// Run the full initialization sequence.
///
/// Never fails as a whole: the container should end up in the best
/// reachable state, so each step's error is reported and swallowed here.
pub fn run(settings: &Settings, capabilities: &Capabilities) {
    if !settings.token_location.exists() {
        println!("Creating token file");
        report(
            "create token file",
            TokenRecord::new(settings.refresh_token.clone()).write(&settings.token_location),
        );
    }

    if !settings.config_location.exists() {
        println!("Creating config directory and default environment file");
        report("create config directory", create_config_dir(settings));
    }

    if !settings.requirements_location.exists() {
        println!("Creating default requirements.txt");
        report(
            "create requirements file",
            requirements::write_empty(&settings.requirements_location),
        );
    }

    if !settings.config_json_location.exists() {
        println!("Creating default examples manifest");
        report(
            "create examples manifest",
            ExamplesManifest::default_for(&settings.notebook_location)
                .write(&settings.config_json_location),
        );
    }

    report(
        "download example notebooks",
        content::download_examples(settings, capabilities.fetcher.as_ref()),
    );

    report(
        "provision SSH keys",
        keys::provision(settings, capabilities.keygen.as_ref()),
    );

    report("normalize key permissions", permissions::normalize(settings));

    if settings.requirements_location.exists() {
        report(
            "install user packages",
            capabilities
                .installer
                .install(&settings.requirements_location),
        );
    }
}

/// Materialize the config directory: environment file plus SSH client
/// config. The required host and key-name settings are resolved before
/// anything is created, so a missing variable leaves no half-built
/// directory behind.
pub fn create_config_dir(settings: &Settings) -> Result<()> {
    let dir = &settings.config_location;
    if dir.exists() && !dir.is_dir() {
        return Err(InitError::NotADirectory(dir.clone()));
    }

    let credmgr_host = settings.credmgr_host()?;
    let orchestrator_host = settings.orchestrator_host()?;
    let bastion_host = settings.bastion_host()?;
    let bastion_key = settings.bastion_key_path()?;
    let slice_private_key = settings.slice_private_key_path()?;
    let slice_public_key = settings.slice_public_key_path()?;

    fs::create_dir_all(dir)?;

    let mut rc = EnvFile::new();
    rc.push(vars::CREDMGR_HOST, credmgr_host);
    rc.push(vars::ORCHESTRATOR_HOST, orchestrator_host);
    rc.push(vars::BASTION_HOST, bastion_host);
    rc.push(vars::PROJECT_ID, "<Update Project Id>");
    rc.push(vars::BASTION_USERNAME, "<Update User Name>");
    rc.push(vars::BASTION_KEY_LOCATION, bastion_key.display().to_string());
    rc.push(
        vars::SLICE_PRIVATE_KEY_FILE,
        slice_private_key.display().to_string(),
    );
    rc.push(
        vars::SLICE_PUBLIC_KEY_FILE,
        slice_public_key.display().to_string(),
    );
    rc.push(vars::SLICE_PRIVATE_KEY_PASSPHRASE, "<Update Passphrase>");
    rc.push(vars::LOG_LEVEL, DEFAULT_LOG_LEVEL);
    rc.push(vars::LOG_FILE, DEFAULT_LOG_FILE);
    rc.write(&settings.env_file_path())?;

    ssh_config::write(&settings.ssh_config_path(), bastion_host, &bastion_key)
}

/// Log a step failure with its cause chain; successes pass silently.
fn report(step: &str, result: Result<()>) {
    if let Err(e) = result {
        eprintln!("Failed to {}: {}", step, e);
        let mut source = std::error::Error::source(&e);
        while let Some(cause) = source {
            eprintln!("  caused by: {}", cause);
            source = cause.source();
        }
    }
}

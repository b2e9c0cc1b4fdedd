//! SSH key placement and permission bits.

use crate::error::Result;
use crate::external::KeyGenerator;
use crate::settings::Settings;
use crate::utils::fs::{atomic_write, set_mode};
use std::fs;

pub const KEY_COMMENT: &str = "notebook@localhost";

/// Generate a fresh keypair and place both pairs.
///
/// The default pair is rewritten on every run (a container restart rotates
/// it); the slice pair under the config directory is written only when
/// absent and kept stable across restarts.
pub fn provision(settings: &Settings, keygen: &dyn KeyGenerator) -> Result<()> {
    let keypair = keygen.generate(KEY_COMMENT)?;

    let private = &settings.default_private_key;
    let public = &settings.default_public_key;
    if let Some(parent) = private.parent() {
        fs::create_dir_all(parent)?;
    }
    atomic_write(private, &keypair.private_key)?;
    atomic_write(public, &keypair.public_line())?;

    let slice_private = settings.slice_private_key_path()?;
    let slice_public = settings.slice_public_key_path()?;
    if !slice_private.exists() {
        atomic_write(&slice_private, &keypair.private_key)?;
    }
    if !slice_public.exists() {
        atomic_write(&slice_public, &keypair.public_line())?;
    }

    set_mode(private, 0o600)?;
    set_mode(public, 0o644)?;
    set_mode(&slice_private, 0o600)?;
    set_mode(&slice_public, 0o644)?;

    Ok(())
}

//! Permission normalization driven by the generated environment file.

use crate::artifacts::env_file;
use crate::error::Result;
use crate::settings::{vars, Settings};
use crate::utils::fs::set_mode;
use std::path::Path;

/// Re-read the environment file and apply strict permission bits to the
/// key files it references: private keys 0600, public keys 0644.
///
/// Variables other than the key locations are ignored, as are paths that
/// do not exist. A missing environment file is a no-op.
pub fn normalize(settings: &Settings) -> Result<()> {
    let rc_path = settings.env_file_path();
    if !rc_path.exists() {
        return Ok(());
    }

    for (variable, value) in env_file::parse(&rc_path)? {
        let mode = match variable.as_str() {
            vars::BASTION_KEY_LOCATION | vars::SLICE_PRIVATE_KEY_FILE => 0o600,
            vars::SLICE_PUBLIC_KEY_FILE => 0o644,
            _ => continue,
        };

        let path = Path::new(&value);
        if path.exists() {
            set_mode(path, mode)?;
        }
    }

    Ok(())
}

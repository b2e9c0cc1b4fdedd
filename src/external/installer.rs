use crate::error::{InitError, Result};
use std::path::Path;
use std::process::Command;

/// Package-installation capability for the requirements manifest.
pub trait PackageInstaller {
    fn install(&self, requirements: &Path) -> Result<()>;
}

/// Production installer invoking pip through `python3 -m pip`.
pub struct PipInstaller;

impl PipInstaller {
    /// Check if python3 is installed
    pub fn is_installed() -> bool {
        which::which("python3").is_ok()
    }
}

impl PackageInstaller for PipInstaller {
    fn install(&self, requirements: &Path) -> Result<()> {
        if !Self::is_installed() {
            return Err(InitError::Install("python3 not found".to_string()));
        }

        let status = Command::new("python3")
            .args(["-m", "pip", "install", "-r"])
            .arg(requirements)
            .status()
            .map_err(|e| InitError::Install(format!("Failed to run pip: {}", e)))?;

        if !status.success() {
            return Err(InitError::Install(format!(
                "pip exited with status {}",
                status
            )));
        }

        Ok(())
    }
}

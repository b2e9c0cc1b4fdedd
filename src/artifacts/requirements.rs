use crate::error::Result;
use crate::utils::fs::atomic_write;
use std::path::Path;

/// Create an empty requirements manifest for user-added packages.
pub fn write_empty(path: &Path) -> Result<()> {
    atomic_write(path, "")
}

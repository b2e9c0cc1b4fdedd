use crate::error::{InitError, Result};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Write `contents` to `path` atomically.
///
/// The content is staged in a temp file in the destination directory and
/// renamed into place, so a concurrent reader never observes a partially
/// written file. Overwrites any existing file.
pub fn atomic_write(path: &Path, contents: &str) -> Result<()> {
    let dir = path.parent().ok_or_else(|| {
        InitError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("{} has no parent directory", path.display()),
        ))
    })?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| InitError::Io(e.error))?;
    Ok(())
}

/// Set POSIX permission bits on `path`. No-op on non-Unix platforms.
pub fn set_mode(path: &Path, mode: u32) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))?;
    }
    #[cfg(not(unix))]
    let _ = (path, mode);

    Ok(())
}

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InitError {
    #[error("Required environment variable {0} is not set")]
    MissingEnv(String),

    #[error("{0} exists but is not a directory")]
    NotADirectory(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Download failed for {url}: {reason}")]
    Download { url: String, reason: String },

    #[error("Failed to extract {archive}: {reason}")]
    Extract { archive: PathBuf, reason: String },

    #[error("ssh-keygen not installed")]
    KeygenNotInstalled,

    #[error("Key generation failed: {0}")]
    Keygen(String),

    #[error("Package installation failed: {0}")]
    Install(String),
}

pub type Result<T> = std::result::Result<T, InitError>;

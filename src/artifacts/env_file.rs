//! The shell-sourceable environment file written into the config directory.
//!
//! The permission normalizer recovers key-file paths by re-reading this
//! file on later runs, so the writer and the parser must agree on the
//! exact line format (`export KEY=value`, optionally commented out with a
//! leading `#`). Both live in this module.

use crate::error::Result;
use crate::utils::fs::atomic_write;
use std::fs;
use std::path::Path;

pub const FILE_NAME: &str = "testbed_rc";

/// A value containing an angle-bracket marker is a placeholder the user
/// must edit by hand; such lines are written commented out.
pub fn is_placeholder(value: &str) -> bool {
    value.contains('<') && value.contains('>')
}

/// Ordered `KEY=value` entries for the environment file.
#[derive(Debug, Default)]
pub struct EnvFile {
    entries: Vec<(String, String)>,
}

impl EnvFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push((key.into(), value.into()));
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.entries {
            if is_placeholder(value) {
                out.push_str(&format!("#export {}={}\n", key, value));
            } else {
                out.push_str(&format!("export {}={}\n", key, value));
            }
        }
        out
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        atomic_write(path, &self.render())
    }
}

/// Parse the active (uncommented) entries back out of an environment file.
///
/// Blank lines and `#` comments are skipped; each remaining line is split
/// on the first `=`, with the `export` token and surrounding whitespace
/// stripped from the variable name.
pub fn parse(path: &Path) -> Result<Vec<(String, String)>> {
    let content = fs::read_to_string(path)?;
    Ok(parse_entries(&content))
}

fn parse_entries(content: &str) -> Vec<(String, String)> {
    let mut entries = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((variable, value)) = line.split_once('=') else {
            continue;
        };
        let variable = variable
            .trim()
            .strip_prefix("export")
            .unwrap_or(variable)
            .trim();
        entries.push((variable.to_string(), value.trim().to_string()));
    }
    entries
}

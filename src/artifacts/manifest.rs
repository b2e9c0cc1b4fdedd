use crate::error::Result;
use crate::utils::fs::atomic_write;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Manifest entry URL meaning "derive fetch tasks from the configured tag
/// list and base URL".
pub const SENTINEL_URL: &str = "default";

/// The JSON manifest driving example-content downloads.
///
/// The file is user-editable between runs; entries with missing fields or
/// extra fields must be tolerated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExamplesManifest {
    #[serde(default)]
    pub examples: Vec<ExampleEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExampleEntry {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl ExamplesManifest {
    /// The manifest written when none exists: a single sentinel entry
    /// targeting the notebook root.
    pub fn default_for(notebook_location: &Path) -> Self {
        Self {
            examples: vec![ExampleEntry {
                url: Some(SENTINEL_URL.to_string()),
                location: Some(notebook_location.display().to_string()),
            }],
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        atomic_write(path, &serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_manifest_uses_sentinel_url() {
        let manifest = ExamplesManifest::default_for(&PathBuf::from("/work"));

        assert_eq!(manifest.examples.len(), 1);
        assert_eq!(manifest.examples[0].url.as_deref(), Some(SENTINEL_URL));
        assert_eq!(manifest.examples[0].location.as_deref(), Some("/work"));
    }

    #[test]
    fn test_load_tolerates_missing_and_extra_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("testbed_config.json");
        std::fs::write(
            &path,
            r#"{"examples":[{"url":"default"},{"location":"/work","note":"added by hand"}]}"#,
        )
        .unwrap();

        let manifest = ExamplesManifest::load(&path).unwrap();
        assert_eq!(manifest.examples.len(), 2);
        assert_eq!(manifest.examples[0].location, None);
        assert_eq!(manifest.examples[1].url, None);
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("testbed_config.json");
        std::fs::write(&path, "{not json").unwrap();

        assert!(ExamplesManifest::load(&path).is_err());
    }

    #[test]
    fn test_write_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("testbed_config.json");

        let manifest = ExamplesManifest::default_for(&PathBuf::from("/work"));
        manifest.write(&path).unwrap();

        let loaded = ExamplesManifest::load(&path).unwrap();
        assert_eq!(loaded.examples.len(), 1);
        assert_eq!(loaded.examples[0].url.as_deref(), Some(SENTINEL_URL));
    }
}

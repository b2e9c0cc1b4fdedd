//! Example-content download: turns the JSON manifest into fetch tasks and
//! runs the missing ones.

use crate::artifacts::manifest::{ExamplesManifest, SENTINEL_URL};
use crate::error::{InitError, Result};
use crate::external::ArchiveFetcher;
use crate::settings::Settings;
use crate::utils::url;
use std::fs;
use std::path::PathBuf;

/// Directory-name prefix every unpacked example set lands under.
pub const EXAMPLES_DIR_PREFIX: &str = "jupyter-examples";

/// One archive to fetch: the presence of `target` on disk is the sole
/// signal that the task has already been done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTask {
    pub target: PathBuf,
    pub url: String,
    pub location: PathBuf,
}

/// Expand the manifest into fetch tasks.
///
/// Entries missing either field are skipped. The sentinel URL expands into
/// one task per configured tag against the release base URL; any other URL
/// yields a single task with a tag derived from its file name.
pub fn plan_fetches(manifest: &ExamplesManifest, tags: &str, repo_url: &str) -> Vec<FetchTask> {
    let mut tasks = Vec::new();

    for entry in &manifest.examples {
        let (Some(entry_url), Some(location)) = (&entry.url, &entry.location) else {
            continue;
        };
        let location = PathBuf::from(location);

        if entry_url == SENTINEL_URL {
            for tag in tags.split(',').filter(|t| !t.is_empty()) {
                tasks.push(FetchTask {
                    target: location.join(format!("{}-{}", EXAMPLES_DIR_PREFIX, tag)),
                    url: format!("{}/{}.tar.gz", repo_url, tag),
                    location: location.clone(),
                });
            }
        } else {
            let tag = derive_tag(entry_url);
            tasks.push(FetchTask {
                target: location.join(format!("{}-{}", EXAMPLES_DIR_PREFIX, tag)),
                url: entry_url.clone(),
                location,
            });
        }
    }

    tasks
}

/// Tag label for an explicit archive URL: the base file name with its
/// query/fragment and a trailing `.tar.gz` or `.zip` removed.
pub fn derive_tag(archive_url: &str) -> String {
    let file = url::file_name(archive_url);
    file.strip_suffix(".tar.gz")
        .or_else(|| file.strip_suffix(".zip"))
        .unwrap_or(file)
        .to_string()
}

/// Fetch every missing example set declared in the manifest.
///
/// An unreadable or malformed manifest means there is nothing to download;
/// a failed fetch is logged and the remaining tasks still run.
pub fn download_examples(settings: &Settings, fetcher: &dyn ArchiveFetcher) -> Result<()> {
    let manifest = match ExamplesManifest::load(&settings.config_json_location) {
        Ok(manifest) => manifest,
        Err(e) => {
            eprintln!(
                "Nothing to download: could not read {}: {}",
                settings.config_json_location.display(),
                e
            );
            return Ok(());
        }
    };

    if manifest.examples.is_empty() {
        println!("Nothing to download: no example entries");
        return Ok(());
    }

    for task in plan_fetches(&manifest, &settings.tags, &settings.repo_url) {
        if task.target.exists() {
            continue;
        }

        println!(
            "Downloading examples: {} at {}",
            task.url,
            task.location.display()
        );
        let fetched = fs::create_dir_all(&task.location)
            .map_err(InitError::from)
            .and_then(|_| fetcher.fetch_and_unpack(&task.url, &task.location));
        if let Err(e) = fetched {
            eprintln!("Failed to fetch {}: {}", task.url, e);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::manifest::ExampleEntry;

    fn manifest(entries: Vec<ExampleEntry>) -> ExamplesManifest {
        ExamplesManifest { examples: entries }
    }

    fn entry(url: &str, location: &str) -> ExampleEntry {
        ExampleEntry {
            url: Some(url.to_string()),
            location: Some(location.to_string()),
        }
    }

    #[test]
    fn test_sentinel_expands_to_one_task_per_tag() {
        let tasks = plan_fetches(
            &manifest(vec![entry(SENTINEL_URL, "/work")]),
            "a,b",
            "https://releases.example.net/tags",
        );

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].target, PathBuf::from("/work/jupyter-examples-a"));
        assert_eq!(tasks[0].url, "https://releases.example.net/tags/a.tar.gz");
        assert_eq!(tasks[1].target, PathBuf::from("/work/jupyter-examples-b"));
        assert_eq!(tasks[1].url, "https://releases.example.net/tags/b.tar.gz");
    }

    #[test]
    fn test_default_manifest_single_tag() {
        let tasks = plan_fetches(
            &manifest(vec![entry(SENTINEL_URL, "/work")]),
            "rel1.3",
            "https://releases.example.net/tags",
        );

        assert_eq!(tasks.len(), 1);
        assert_eq!(
            tasks[0].target,
            PathBuf::from("/work/jupyter-examples-rel1.3")
        );
        assert_eq!(
            tasks[0].url,
            "https://releases.example.net/tags/rel1.3.tar.gz"
        );
    }

    #[test]
    fn test_explicit_url_is_used_verbatim() {
        let tasks = plan_fetches(
            &manifest(vec![entry("https://host/path/pkg-v2.tar.gz?x=1#y", "/work")]),
            "rel1.3",
            "https://releases.example.net/tags",
        );

        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].url, "https://host/path/pkg-v2.tar.gz?x=1#y");
        assert_eq!(
            tasks[0].target,
            PathBuf::from("/work/jupyter-examples-pkg-v2")
        );
    }

    #[test]
    fn test_entry_missing_location_is_skipped() {
        let incomplete = ExampleEntry {
            url: Some(SENTINEL_URL.to_string()),
            location: None,
        };
        let tasks = plan_fetches(&manifest(vec![incomplete]), "a", "https://base");

        assert!(tasks.is_empty());
    }

    #[test]
    fn test_entry_missing_url_is_skipped() {
        let incomplete = ExampleEntry {
            url: None,
            location: Some("/work".to_string()),
        };
        let tasks = plan_fetches(&manifest(vec![incomplete]), "a", "https://base");

        assert!(tasks.is_empty());
    }

    #[test]
    fn test_derive_tag_strips_query_fragment_and_extension() {
        assert_eq!(derive_tag("https://host/path/pkg-v2.tar.gz?x=1#y"), "pkg-v2");
        assert_eq!(derive_tag("https://host/path/pkg-v2.zip"), "pkg-v2");
        assert_eq!(derive_tag("https://host/path/rel1.3.tar.gz"), "rel1.3");
        assert_eq!(derive_tag("https://host/path/no-extension"), "no-extension");
    }
}

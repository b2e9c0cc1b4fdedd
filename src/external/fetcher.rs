use crate::error::{InitError, Result};
use crate::utils::url;
use flate2::read::GzDecoder;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::{self, File};
use std::io;
use std::path::Path;
use std::time::Duration;

/// Fetch-and-unpack capability for release archives.
pub trait ArchiveFetcher {
    /// Download the archive at `url` into `dest`, extract it there, and
    /// remove the downloaded archive file.
    fn fetch_and_unpack(&self, url: &str, dest: &Path) -> Result<()>;
}

/// Production fetcher: blocking HTTP GET, gzip-compressed tar extraction.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }

    fn download(&self, source: &str, archive: &Path) -> Result<()> {
        let response = self
            .client
            .get(source)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| InitError::Download {
                url: source.to_string(),
                reason: e.to_string(),
            })?;

        let pb = match response.content_length() {
            Some(len) => {
                let pb = ProgressBar::new(len);
                pb.set_style(
                    ProgressStyle::default_bar()
                        .template("[{bar:40.cyan/blue}] {bytes}/{total_bytes} {msg}")
                        .unwrap_or_else(|_| ProgressStyle::default_bar())
                        .progress_chars("#>-"),
                );
                pb
            }
            None => {
                let pb = ProgressBar::new_spinner();
                pb.enable_steady_tick(Duration::from_millis(120));
                pb
            }
        };

        let mut file = File::create(archive)?;
        let result = io::copy(&mut pb.wrap_read(response), &mut file);
        pb.finish_and_clear();

        result.map_err(|e| InitError::Download {
            url: source.to_string(),
            reason: e.to_string(),
        })?;
        Ok(())
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveFetcher for HttpFetcher {
    fn fetch_and_unpack(&self, source: &str, dest: &Path) -> Result<()> {
        let archive = dest.join(url::file_name(source));

        self.download(source, &archive)?;
        extract(&archive, dest)?;
        fs::remove_file(&archive)?;
        Ok(())
    }
}

/// Unpack a gzip-compressed tarball into `dest`.
fn extract(archive: &Path, dest: &Path) -> Result<()> {
    let file = File::open(archive)?;
    let mut tarball = tar::Archive::new(GzDecoder::new(file));
    tarball.unpack(dest).map_err(|e| InitError::Extract {
        archive: archive.to_path_buf(),
        reason: e.to_string(),
    })
}

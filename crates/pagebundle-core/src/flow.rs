//! Bundle-and-download flow.
//!
//! Fetches every record concurrently, packs the payloads into one zip and
//! hands it to the [`Save`] collaborator. All-or-nothing: one failed fetch
//! means no archive and no save.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use url::Url;

use crate::archive::{Archive, ArchiveError, Progress};
use crate::checksum;
use crate::fetch::{Fetch, FetchError};
use crate::record::{resolve_url, FileRecord};
use crate::save::Save;

/// Outcome of a run that did not fail outright.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Saved {
        path: PathBuf,
        entries: usize,
        bytes: usize,
        sha256: String,
    },
    /// Serialization failed; the error was logged and nothing was saved.
    Skipped,
}

#[derive(Debug, thiserror::Error)]
pub enum BundleError {
    #[error("fetch {filename} ({url}): {source}")]
    Fetch {
        filename: String,
        url: String,
        #[source]
        source: FetchError,
    },
    #[error("fetch task for {filename} panicked: {source}")]
    Join {
        filename: String,
        #[source]
        source: tokio::task::JoinError,
    },
    #[error("save {filename}: {source}")]
    Save {
        filename: String,
        #[source]
        source: io::Error,
    },
}

/// Turns a filled archive into the bytes handed to [`Save`].
type SerializeFn = fn(&Archive, Option<&mut dyn FnMut(&Progress)>) -> Result<Vec<u8>, ArchiveError>;

pub struct BundleFlow {
    fetcher: Arc<dyn Fetch>,
    saver: Arc<dyn Save>,
    base_url: Option<Url>,
    serialize: SerializeFn,
}

impl BundleFlow {
    pub fn new(fetcher: Arc<dyn Fetch>, saver: Arc<dyn Save>) -> Self {
        Self {
            fetcher,
            saver,
            base_url: None,
            serialize: Archive::serialize,
        }
    }

    #[cfg(test)]
    fn with_serializer(mut self, serialize: SerializeFn) -> Self {
        self.serialize = serialize;
        self
    }

    /// Base for relative attachment links (usually the page URL).
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Bundles `records` and saves the archive as `<target_filename>.zip`.
    ///
    /// `observer` receives serialization progress; without one, progress is
    /// logged at debug level. An empty `records` still delivers an (empty)
    /// archive.
    pub async fn run(
        &self,
        target_filename: &str,
        records: &[FileRecord],
        observer: Option<&mut (dyn FnMut(&Progress) + Send)>,
    ) -> Result<Delivery, BundleError> {
        let suggested = format!("{}.zip", target_filename);
        tracing::info!(archive = %suggested, records = records.len(), "bundle started");

        let archive = self.fetch_all(records).await?;

        let mut log_progress = |p: &Progress| tracing::debug!("{}", p);
        let notify: &mut dyn FnMut(&Progress) = match observer {
            Some(o) => o,
            None => &mut log_progress,
        };
        let blob = match (self.serialize)(&archive, Some(notify)) {
            Ok(blob) => blob,
            Err(e) => {
                tracing::error!(archive = %suggested, error = %e, "archive serialization failed");
                return Ok(Delivery::Skipped);
            }
        };

        let path = self
            .saver
            .save(&blob, &suggested)
            .map_err(|source| BundleError::Save {
                filename: suggested.clone(),
                source,
            })?;
        let sha256 = checksum::sha256_bytes(&blob);
        tracing::info!(
            path = %path.display(),
            entries = archive.len(),
            bytes = blob.len(),
            %sha256,
            "bundle delivered"
        );

        Ok(Delivery::Saved {
            path,
            entries: archive.len(),
            bytes: blob.len(),
            sha256,
        })
    }

    /// Fetches all records at once and collects them into an archive in record order.
    ///
    /// Only http and https links are fetched; any other scheme fails the run
    /// before a single request goes out. Every fetch is started before any is
    /// awaited. The first failure wins; fetches still in flight are left to
    /// finish and their results dropped.
    pub async fn fetch_all(&self, records: &[FileRecord]) -> Result<Archive, BundleError> {
        let mut targets = Vec::with_capacity(records.len());
        for record in records {
            let invalid = |msg: String| BundleError::Fetch {
                filename: record.filename.clone(),
                url: record.url.clone(),
                source: FetchError::InvalidUrl(msg),
            };
            let url = resolve_url(&record.url, self.base_url.as_ref())
                .map_err(|e| invalid(e.to_string()))?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(invalid(format!("unsupported scheme {}", url.scheme())));
            }
            targets.push((record.filename.clone(), url));
        }

        let pending: Vec<_> = targets
            .into_iter()
            .map(|(filename, url)| {
                let fetcher = Arc::clone(&self.fetcher);
                let target = url.to_string();
                let handle = tokio::task::spawn_blocking(move || fetcher.fetch(&target));
                async move {
                    match handle.await {
                        Ok(Ok(data)) => Ok((filename, data)),
                        Ok(Err(source)) => Err(BundleError::Fetch {
                            filename,
                            url: url.to_string(),
                            source,
                        }),
                        Err(source) => Err(BundleError::Join { filename, source }),
                    }
                }
            })
            .collect();

        let payloads = futures::future::try_join_all(pending).await?;

        let mut archive = Archive::new();
        for (filename, data) in payloads {
            archive.add_entry(filename, data);
        }
        Ok(archive)
    }
}

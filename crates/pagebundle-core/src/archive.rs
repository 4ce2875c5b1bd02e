//! In-memory zip archive of fetched attachments.
//!
//! Entries are kept as raw bytes until [`Archive::serialize`] deflates them
//! into a single zip buffer. Timestamps are pinned so identical inputs give
//! identical archives.

use std::fmt;
use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// One serialization step: how far along, and which entry is being compressed.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    /// 0.0..=100.0, rounded to two decimals.
    pub percent: f64,
    pub current_file: Option<String>,
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "progression : {:.2} %", self.percent)?;
        if let Some(name) = &self.current_file {
            write!(f, ", current file = {}", name)?;
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("zip: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

/// Named binary entries in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Archive {
    entries: Vec<(String, Vec<u8>)>,
}

impl Archive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `data` under `name` unchanged. A name already present is
    /// overwritten in place (keeps its original position).
    pub fn add_entry(&mut self, name: impl Into<String>, data: Vec<u8>) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => {
                tracing::debug!(%name, "duplicate archive entry replaced");
                slot.1 = data;
            }
            None => self.entries.push((name, data)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Deflates every entry into one zip buffer.
    ///
    /// `observer` sees one [`Progress`] per entry (percent done before that
    /// entry) and a final 100% with no current file.
    pub fn serialize(
        &self,
        mut observer: Option<&mut dyn FnMut(&Progress)>,
    ) -> Result<Vec<u8>, ArchiveError> {
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default());

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let total = self.entries.len();

        for (index, (name, data)) in self.entries.iter().enumerate() {
            if let Some(notify) = observer.as_deref_mut() {
                notify(&Progress {
                    percent: percent(index, total),
                    current_file: Some(name.clone()),
                });
            }
            zip.start_file(name.as_str(), options)?;
            zip.write_all(data)?;
        }

        let cursor = zip.finish()?;
        if let Some(notify) = observer.as_deref_mut() {
            notify(&Progress {
                percent: 100.0,
                current_file: None,
            });
        }
        Ok(cursor.into_inner())
    }
}

fn percent(done: usize, total: usize) -> f64 {
    if total == 0 {
        return 100.0;
    }
    let raw = done as f64 * 100.0 / total as f64;
    (raw * 100.0).round() / 100.0
}

//! Delivery of a finished archive.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Hands a finished archive to the user under `suggested` as its file name.
pub trait Save: Send + Sync {
    fn save(&self, blob: &[u8], suggested: &str) -> io::Result<PathBuf>;
}

/// Writes archives into a directory, replacing any file of the same name.
///
/// Data goes to a temp file in the same directory first and is renamed into
/// place, so a reader never sees a half-written archive.
#[derive(Debug, Clone)]
pub struct DirectorySaver {
    dir: PathBuf,
}

impl DirectorySaver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Save for DirectorySaver {
    fn save(&self, blob: &[u8], suggested: &str) -> io::Result<PathBuf> {
        if suggested.is_empty()
            || suggested == "."
            || suggested == ".."
            || suggested.contains(['/', '\\', '\0'])
        {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("not a plain file name: {:?}", suggested),
            ));
        }
        fs::create_dir_all(&self.dir)?;
        let dest = self.dir.join(suggested);

        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(blob)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&dest).map_err(|e| e.error)?;

        tracing::info!(path = %dest.display(), bytes = blob.len(), "archive saved");
        Ok(dest)
    }
}

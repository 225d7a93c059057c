use crate::{Result, TranscribeError};
use std::path::{Path, PathBuf};
use tracing::warn;
use uuid::Uuid;

/// Uniquely named scratch directory for one job's intermediate files.
///
/// The directory is removed when the guard drops, so early-error paths
/// cannot leak it. Call [`ScratchDir::cleanup`] on the success path to
/// surface removal failures instead of only logging them.
#[derive(Debug)]
pub struct ScratchDir {
    path: PathBuf,
    removed: bool,
}

impl ScratchDir {
    /// Create a fresh scratch directory under `parent`.
    ///
    /// The name is a random UUID. An existing directory with the same
    /// name is an error, never silently reused.
    pub fn create(parent: &Path) -> Result<Self> {
        let path = parent.join(Uuid::new_v4().to_string());
        std::fs::create_dir(&path).map_err(|e| {
            TranscribeError::WorkDir(format!("cannot create {}: {}", path.display(), e))
        })?;

        Ok(Self {
            path,
            removed: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of a file inside the scratch directory.
    pub fn file(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }

    /// Recursively delete the directory and all contents.
    pub fn cleanup(mut self) -> Result<()> {
        self.removed = true;
        std::fs::remove_dir_all(&self.path).map_err(|e| {
            TranscribeError::Cleanup(format!("cannot remove {}: {}", self.path.display(), e))
        })
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        if !self.removed {
            if let Err(e) = std::fs::remove_dir_all(&self.path) {
                warn!(
                    "Failed to remove scratch directory {}: {}",
                    self.path.display(),
                    e
                );
            }
        }
    }
}

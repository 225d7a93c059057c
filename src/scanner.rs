use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// Suffix marking a file as a raw recording.
pub const RECORDING_SUFFIX: &str = ".R.mp4";

/// Suffix of the published transcript acting as the processed marker.
pub const TRANSCRIPT_SUFFIX: &str = ".T.txt";

/// Recursive scanner yielding recordings that have no transcript yet.
#[derive(Debug, Clone)]
pub struct FileScanner {
    root: PathBuf,
}

impl FileScanner {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lazily walk the tree and yield unprocessed recordings.
    ///
    /// Each call starts a fresh traversal, so the scanner can be
    /// re-invoked. Order is filesystem traversal order. Unreadable
    /// entries are logged and skipped.
    pub fn unprocessed(&self) -> impl Iterator<Item = PathBuf> + '_ {
        WalkDir::new(&self.root)
            .into_iter()
            .filter_map(move |entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping unreadable entry under {}: {}", self.root.display(), e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| is_recording(path) && !transcript_path(path).exists())
    }
}

/// True if the file name carries the raw-recording suffix.
pub fn is_recording(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map_or(false, |name| name.ends_with(RECORDING_SUFFIX))
}

/// Derive the published transcript path for a recording.
///
/// The last two dot-delimited extension components are stripped and
/// replaced with the transcript suffix: `talk.R.mp4` -> `talk.T.txt`.
pub fn transcript_path(recording: &Path) -> PathBuf {
    let name = recording
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    let stem = name.rsplitn(3, '.').nth(2).unwrap_or(name);
    recording.with_file_name(format!("{}{}", stem, TRANSCRIPT_SUFFIX))
}

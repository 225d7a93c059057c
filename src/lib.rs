//! Batch video transcription: ffmpeg audio extraction plus a
//! Whisper-style speech-recognition CLI, published as timestamped
//! plain-text transcripts next to the input recordings.

pub mod audio;
pub mod config;
pub mod pipeline;
pub mod scanner;
pub mod transcription;
pub mod workdir;

// Re-export main types for easy access
pub use crate::audio::AudioExtractor;
pub use crate::config::Config;
pub use crate::pipeline::{BatchReport, JobOutcome, Transcriber};
pub use crate::scanner::FileScanner;
pub use crate::transcription::{Segment, TranscriptFormatter, TranscriptionEngine};
pub use crate::workdir::ScratchDir;

/// Result type for transcription operations
pub type Result<T> = std::result::Result<T, TranscribeError>;

/// Error types for transcription operations
#[derive(thiserror::Error, Debug)]
pub enum TranscribeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scratch directory error: {0}")]
    WorkDir(String),

    #[error("Audio extraction failed: {0}")]
    AudioExtraction(String),

    #[error("Transcription failed: {0}")]
    Transcription(String),

    #[error("Invalid transcription output: {0}")]
    OutputParse(#[from] serde_json::Error),

    #[error("Cleanup failed: {0}")]
    Cleanup(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Last portion of a subprocess stderr stream, for error messages.
pub(crate) fn stderr_tail(stderr: &[u8]) -> String {
    const TAIL_CHARS: usize = 400;
    let text = String::from_utf8_lossy(stderr);
    let trimmed = text.trim();
    match trimmed.char_indices().nth_back(TAIL_CHARS) {
        Some((idx, _)) => format!("...{}", &trimmed[idx..]),
        None => trimmed.to_string(),
    }
}

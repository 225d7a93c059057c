use crate::{stderr_tail, Result, TranscribeError};
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::info;

/// Extracts a single MP3 audio track from a video via ffmpeg.
#[derive(Debug, Clone)]
pub struct AudioExtractor {
    ffmpeg_cmd: String,
    timeout: Duration,
}

impl AudioExtractor {
    pub fn new(ffmpeg_cmd: String, timeout: Duration) -> Self {
        Self {
            ffmpeg_cmd,
            timeout,
        }
    }

    /// Convert `video_path` into an MP3 at `audio_path`, overwriting
    /// any existing file at that path.
    ///
    /// A non-zero exit, a missing output file, and an empty output
    /// file are all reported as audio extraction failures.
    pub async fn extract(&self, video_path: &Path, audio_path: &Path) -> Result<()> {
        info!("🎵 Extracting audio: {}", video_path.display());

        let run = Command::new(&self.ffmpeg_cmd)
            .arg("-y") // Overwrite existing
            .arg("-i")
            .arg(video_path)
            .arg("-vn") // No video stream
            .arg(audio_path)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        let output = tokio::time::timeout(self.timeout, run)
            .await
            .map_err(|_| {
                TranscribeError::AudioExtraction(format!(
                    "{} timed out after {}s for {}",
                    self.ffmpeg_cmd,
                    self.timeout.as_secs(),
                    video_path.display()
                ))
            })?
            .map_err(|e| {
                TranscribeError::AudioExtraction(format!("cannot run {}: {}", self.ffmpeg_cmd, e))
            })?;

        if !output.status.success() {
            return Err(TranscribeError::AudioExtraction(format!(
                "{} exited with {} for {}: {}",
                self.ffmpeg_cmd,
                output.status,
                video_path.display(),
                stderr_tail(&output.stderr)
            )));
        }

        let audio_size = tokio::fs::metadata(audio_path)
            .await
            .map(|meta| meta.len())
            .unwrap_or(0);
        if audio_size == 0 {
            return Err(TranscribeError::AudioExtraction(format!(
                "{} produced no audio for {}",
                self.ffmpeg_cmd,
                video_path.display()
            )));
        }

        info!(
            "✅ Audio extracted: {} ({} bytes)",
            audio_path.display(),
            audio_size
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_command_is_extraction_error() {
        let temp_dir = TempDir::new().unwrap();
        let extractor = AudioExtractor::new(
            "ffmpeg-definitely-not-installed".to_string(),
            Duration::from_secs(5),
        );

        let result = extractor
            .extract(
                &temp_dir.path().join("in.R.mp4"),
                &temp_dir.path().join("audio.mp3"),
            )
            .await;

        assert!(matches!(result, Err(TranscribeError::AudioExtraction(_))));
    }
}

use crate::{stderr_tail, Result, TranscribeError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, info};

/// One contiguous span of recognized speech.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
    /// Transcribed text
    pub text: String,
}

/// JSON document written by the transcription CLI. Extra fields
/// (language, word timings, probabilities) are ignored.
#[derive(Debug, Deserialize)]
struct EngineOutput {
    #[serde(default)]
    segments: Vec<Segment>,
}

/// Wrapper around a stable-ts style speech-recognition CLI.
///
/// Constructed once per process and reused across jobs; holds only
/// immutable configuration, so reuse is safe.
#[derive(Debug, Clone)]
pub struct TranscriptionEngine {
    command: String,
    model: String,
    regroup_gap: f64,
    timeout: Duration,
}

impl TranscriptionEngine {
    pub fn new(command: String, model: String, regroup_gap: f64, timeout: Duration) -> Self {
        Self {
            command,
            model,
            regroup_gap,
            timeout,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Run the model over `audio_path`, writing the intermediate JSON
    /// document to `json_path`, and return the ordered segments.
    ///
    /// An empty segment list is a valid result for silent input.
    pub async fn transcribe(&self, audio_path: &Path, json_path: &Path) -> Result<Vec<Segment>> {
        info!(
            "🎤 Transcribing {} with model {}",
            audio_path.display(),
            self.model
        );

        let mut cmd = Command::new(&self.command);
        cmd.arg(audio_path)
            .arg("--model")
            .arg(&self.model)
            .arg("--regroup")
            .arg(format!("ms_sg={}", self.regroup_gap))
            .arg("--output")
            .arg(json_path)
            .arg("--overwrite")
            .stdin(Stdio::null())
            .kill_on_drop(true);

        debug!("Executing command: {:?}", cmd);

        let output = tokio::time::timeout(self.timeout, cmd.output())
            .await
            .map_err(|_| {
                TranscribeError::Transcription(format!(
                    "{} timed out after {}s for {}",
                    self.command,
                    self.timeout.as_secs(),
                    audio_path.display()
                ))
            })?
            .map_err(|e| {
                TranscribeError::Transcription(format!("cannot run {}: {}", self.command, e))
            })?;

        if !output.status.success() {
            return Err(TranscribeError::Transcription(format!(
                "{} exited with {} for {}: {}",
                self.command,
                output.status,
                audio_path.display(),
                stderr_tail(&output.stderr)
            )));
        }

        let json_content = tokio::fs::read_to_string(json_path).await.map_err(|e| {
            TranscribeError::Transcription(format!(
                "no JSON output from {} at {}: {}",
                self.command,
                json_path.display(),
                e
            ))
        })?;

        let parsed: EngineOutput = serde_json::from_str(&json_content)?;

        info!("✅ Transcription produced {} segments", parsed.segments.len());
        Ok(parsed.segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_creation() {
        let engine = TranscriptionEngine::new(
            "stable-ts".to_string(),
            "small".to_string(),
            2.0,
            Duration::from_secs(60),
        );
        assert_eq!(engine.model(), "small");
    }

    #[test]
    fn test_parse_engine_output() {
        let json = r#"{
            "language": "en",
            "segments": [
                {"start": 0.0, "end": 2.5, "text": " Hello there.", "avg_logprob": -0.3},
                {"start": 4.0, "end": 6.0, "text": " Second segment."}
            ]
        }"#;

        let parsed: EngineOutput = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.segments.len(), 2);
        assert_eq!(parsed.segments[0].start, 0.0);
        assert_eq!(parsed.segments[0].text, " Hello there.");
        assert_eq!(parsed.segments[1].end, 6.0);
    }

    #[test]
    fn test_parse_empty_segments() {
        let parsed: EngineOutput = serde_json::from_str(r#"{"segments": []}"#).unwrap();
        assert!(parsed.segments.is_empty());
    }

    #[test]
    fn test_parse_missing_segments_key() {
        let parsed: EngineOutput = serde_json::from_str(r#"{"language": "en"}"#).unwrap();
        assert!(parsed.segments.is_empty());
    }

    #[test]
    fn test_missing_command_is_transcription_error() {
        tokio_test::block_on(async {
            let engine = TranscriptionEngine::new(
                "stable-ts-definitely-not-installed".to_string(),
                "small".to_string(),
                2.0,
                Duration::from_secs(5),
            );

            let result = engine
                .transcribe(Path::new("audio.mp3"), Path::new("out.json"))
                .await;

            assert!(matches!(result, Err(TranscribeError::Transcription(_))));
        });
    }
}

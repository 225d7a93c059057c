use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, Semaphore};
use tracing::{info, warn};

use crate::audio::AudioExtractor;
use crate::config::Config;
use crate::scanner::{transcript_path, FileScanner};
use crate::transcription::{TranscriptFormatter, TranscriptionEngine};
use crate::workdir::ScratchDir;
use crate::Result;

const AUDIO_FILE: &str = "audio.mp3";
const JSON_FILE: &str = "transcription.json";
const TEXT_FILE: &str = "transcription.txt";

/// Outcome of one transcription job
#[derive(Debug, Clone)]
pub struct JobOutcome {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub error: Option<String>,
    pub elapsed: Duration,
}

impl JobOutcome {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Aggregate results of a batch run
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub outcomes: Vec<JobOutcome>,
}

/// Drives one recording through the full pipeline: scratch directory,
/// audio extraction, transcription, formatting, publish, cleanup.
#[derive(Debug, Clone)]
pub struct Transcriber {
    config: Config,
    extractor: AudioExtractor,
    engine: TranscriptionEngine,
    formatter: TranscriptFormatter,
}

impl Transcriber {
    pub fn new(config: Config) -> Self {
        let extractor = AudioExtractor::new(config.ffmpeg_cmd.clone(), config.timeout());
        let engine = TranscriptionEngine::new(
            config.transcribe_cmd.clone(),
            config.model.clone(),
            config.regroup_gap,
            config.timeout(),
        );

        Self {
            config,
            extractor,
            engine,
            formatter: TranscriptFormatter::new(),
        }
    }

    /// Transcribe a single video and publish the transcript next to it.
    ///
    /// The scratch directory is removed on every exit path; the
    /// transcript is written only after transcription succeeded.
    pub async fn transcribe_file(&self, input: &Path) -> Result<PathBuf> {
        info!("🎬 Transcribing: {}", input.display());

        let scratch = ScratchDir::create(&self.config.work_dir)?;

        let audio_path = scratch.file(AUDIO_FILE);
        self.extractor.extract(input, &audio_path).await?;

        let segments = self
            .engine
            .transcribe(&audio_path, &scratch.file(JSON_FILE))
            .await?;

        let text_path = scratch.file(TEXT_FILE);
        tokio::fs::write(&text_path, self.formatter.render(&segments)).await?;

        let output = transcript_path(input);
        tokio::fs::copy(&text_path, &output).await?;

        scratch.cleanup()?;

        info!("💾 Transcript published: {}", output.display());
        Ok(output)
    }

    /// Scan the configured root and transcribe every unprocessed
    /// recording through a bounded worker pool.
    ///
    /// A failed job is logged and counted; the rest of the batch
    /// continues.
    pub async fn transcribe_all(&self) -> Result<BatchReport> {
        let scanner = FileScanner::new(self.config.root_dir.clone());
        let inputs: Vec<PathBuf> = scanner.unprocessed().collect();

        if inputs.is_empty() {
            info!(
                "No unprocessed recordings under {}",
                self.config.root_dir.display()
            );
            return Ok(BatchReport::default());
        }

        let total = inputs.len();
        info!("📹 Found {} recordings to transcribe", total);

        let semaphore = Arc::new(Semaphore::new(self.config.workers));
        let (tx, mut rx) = mpsc::channel(total);

        for (index, input) in inputs.into_iter().enumerate() {
            let transcriber = self.clone();
            let semaphore = Arc::clone(&semaphore);
            let tx = tx.clone();

            tokio::spawn(async move {
                let _permit = semaphore.acquire().await.unwrap();

                info!("📼 Job {}/{}: {}", index + 1, total, input.display());
                let started = Instant::now();
                let outcome = match transcriber.transcribe_file(&input).await {
                    Ok(output) => JobOutcome {
                        input,
                        output: Some(output),
                        error: None,
                        elapsed: started.elapsed(),
                    },
                    Err(e) => JobOutcome {
                        input,
                        output: None,
                        error: Some(e.to_string()),
                        elapsed: started.elapsed(),
                    },
                };

                let _ = tx.send(outcome).await;
            });
        }

        // Close the channel once all tasks hold their own sender.
        drop(tx);

        let mut report = BatchReport {
            total,
            ..Default::default()
        };
        while let Some(outcome) = rx.recv().await {
            if outcome.succeeded() {
                report.succeeded += 1;
                info!(
                    "✅ Completed: {} in {:.2}s",
                    outcome.input.display(),
                    outcome.elapsed.as_secs_f64()
                );
            } else {
                report.failed += 1;
                warn!(
                    "❌ Failed: {} - {}",
                    outcome.input.display(),
                    outcome.error.as_deref().unwrap_or("unknown error")
                );
            }
            report.outcomes.push(outcome);
        }

        Ok(report)
    }
}

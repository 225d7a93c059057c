use crate::{Result, TranscribeError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the transcriber
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root directory scanned for unprocessed recordings in batch mode
    pub root_dir: PathBuf,

    /// Parent directory for per-job scratch directories
    pub work_dir: PathBuf,

    /// Model size identifier passed to the transcription CLI
    pub model: String,

    /// Minimum silence gap in seconds between two speech segments to split them
    pub regroup_gap: f64,

    /// ffmpeg command name
    pub ffmpeg_cmd: String,

    /// Transcription CLI command name
    pub transcribe_cmd: String,

    /// Timeout for external commands (seconds)
    pub timeout_secs: u64,

    /// Batch worker pool size (1 = strictly sequential)
    pub workers: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("/mnt/d"),
            work_dir: PathBuf::from("."),
            model: "small".to_string(),
            regroup_gap: 2.0,
            ffmpeg_cmd: "ffmpeg".to_string(),
            transcribe_cmd: "stable-ts".to_string(),
            timeout_secs: 3600, // 60 minutes for large files
            workers: 1,
        }
    }
}

impl Config {
    /// Load configuration from the first readable TOML file, falling
    /// back to defaults, then apply environment overrides.
    pub fn load() -> Self {
        let config_paths = ["transcriber.toml", "config/transcriber.toml"];

        let mut config = Self::default();
        for path in &config_paths {
            if let Ok(config_str) = std::fs::read_to_string(path) {
                match toml::from_str(&config_str) {
                    Ok(parsed) => {
                        tracing::info!("Loaded configuration from: {}", path);
                        config = parsed;
                        break;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config file {}: {}", path, e);
                    }
                }
            }
        }

        config.apply_env();
        config
    }

    /// Override fields from TRANSCRIBER_* environment variables.
    fn apply_env(&mut self) {
        if let Ok(root_dir) = std::env::var("TRANSCRIBER_ROOT_DIR") {
            self.root_dir = PathBuf::from(root_dir);
        }

        if let Ok(model) = std::env::var("TRANSCRIBER_MODEL") {
            self.model = model;
        }

        if let Ok(workers) = std::env::var("TRANSCRIBER_WORKERS") {
            if let Ok(workers) = workers.parse() {
                self.workers = workers;
            }
        }

        if let Ok(timeout) = std::env::var("TRANSCRIBER_TIMEOUT_SECS") {
            if let Ok(timeout) = timeout.parse() {
                self.timeout_secs = timeout;
            }
        }
    }

    /// Timeout applied to each external command invocation.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(TranscribeError::Configuration(
                "workers must be greater than 0".to_string(),
            ));
        }

        if self.workers > num_cpus::get() {
            tracing::warn!(
                "workers ({}) exceeds available cores ({})",
                self.workers,
                num_cpus::get()
            );
        }

        if self.timeout_secs == 0 {
            return Err(TranscribeError::Configuration(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.regroup_gap <= 0.0 {
            return Err(TranscribeError::Configuration(
                "regroup_gap must be positive".to_string(),
            ));
        }

        if self.model.is_empty() {
            return Err(TranscribeError::Configuration(
                "model must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.model, "small");
        assert_eq!(config.regroup_gap, 2.0);
        assert_eq!(config.workers, 1);
        assert_eq!(config.root_dir, PathBuf::from("/mnt/d"));
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_zero_workers_rejected() {
        let config = Config {
            workers: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = Config {
            timeout_secs: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_regroup_gap_rejected() {
        let config = Config {
            regroup_gap: -1.0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str("model = \"base\"\nworkers = 4\n").unwrap();
        assert_eq!(config.model, "base");
        assert_eq!(config.workers, 4);
        assert_eq!(config.regroup_gap, 2.0);
        assert_eq!(config.transcribe_cmd, "stable-ts");
    }
}

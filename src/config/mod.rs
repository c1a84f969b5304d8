//! Configuration module for cancelwatch.
//!
//! Configuration is layered: environment variables (optionally from `.env`),
//! then an optional TOML detector file, then command-line overrides applied by
//! the caller.

mod detector_env_config;
mod detector_file_config;
mod source_config;

pub use detector_env_config::{
    DetectorEnvConfig, MAX_CANCEL_RATIO_VAR, SCAN_VAR, WINDOW_MS_VAR,
};
pub use detector_file_config::{DetectorFileConfig, RatioValue};
pub use source_config::{CONFIG_VAR, DEFAULT_INPUT_PATH, INPUT_VAR, SourceEnvConfig};

use crate::domain::errors::ConfigError;
use crate::domain::surveillance::{DetectorConfig, ScanPolicy};
use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use tracing::info;

/// Main application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    // Source
    pub input_path: PathBuf,
    pub config_file: Option<PathBuf>,

    // Detector (raw, validated by `detector_config`)
    pub window_ms: i64,
    pub max_cancel_ratio: Decimal,
    pub scan: ScanPolicy,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// When `CANCELWATCH_CONFIG` names a TOML file, its values override the
    /// environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let source = SourceEnvConfig::from_lookup(&lookup);
        let detector =
            DetectorEnvConfig::from_lookup(&lookup).context("Failed to load detector config")?;

        let mut config = Self {
            input_path: source.input_path,
            config_file: None,
            window_ms: detector.window_ms,
            max_cancel_ratio: detector.max_cancel_ratio,
            scan: detector.scan,
        };

        if let Some(path) = source.config_file {
            config.apply_file(&path)?;
        }

        Ok(config)
    }

    /// Overlays the values present in a TOML detector file.
    pub fn apply_file(&mut self, path: &Path) -> Result<()> {
        let file = DetectorFileConfig::load(path)
            .context(format!("Failed to load detector config file: {}", path.display()))?;

        if let Some(window_ms) = file.window_ms {
            self.window_ms = window_ms;
        }
        if let Some(ratio) = &file.max_cancel_ratio {
            self.max_cancel_ratio = ratio.to_decimal()?;
        }
        if let Some(scan) = file.scan {
            self.scan = scan;
        }

        info!("Loaded detector config from {}", path.display());
        self.config_file = Some(path.to_path_buf());
        Ok(())
    }

    /// Validated detector thresholds.
    pub fn detector_config(&self) -> Result<DetectorConfig, ConfigError> {
        DetectorConfig::new(self.window_ms, self.max_cancel_ratio, self.scan)
    }
}

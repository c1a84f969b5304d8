//! Detector threshold parsing from environment variables.
//!
//! Values are kept raw here; range checks happen when the
//! [`DetectorConfig`](crate::domain::surveillance::DetectorConfig) is built.

use crate::domain::surveillance::ScanPolicy;
use crate::domain::surveillance::detector_config::{DEFAULT_MAX_CANCEL_RATIO, DEFAULT_WINDOW_MS};
use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::str::FromStr;

pub const WINDOW_MS_VAR: &str = "CANCELWATCH_WINDOW_MS";
pub const MAX_CANCEL_RATIO_VAR: &str = "CANCELWATCH_MAX_CANCEL_RATIO";
pub const SCAN_VAR: &str = "CANCELWATCH_SCAN";

/// Detector environment configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectorEnvConfig {
    pub window_ms: i64,
    pub max_cancel_ratio: Decimal,
    pub scan: ScanPolicy,
}

impl Default for DetectorEnvConfig {
    fn default() -> Self {
        Self {
            window_ms: DEFAULT_WINDOW_MS,
            max_cancel_ratio: DEFAULT_MAX_CANCEL_RATIO,
            scan: ScanPolicy::default(),
        }
    }
}

impl DetectorEnvConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let window_ms = match lookup(WINDOW_MS_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .context(format!("Failed to parse {}", WINDOW_MS_VAR))?,
            None => defaults.window_ms,
        };

        let max_cancel_ratio = match lookup(MAX_CANCEL_RATIO_VAR) {
            Some(raw) => Decimal::from_str(raw.trim())
                .context(format!("Failed to parse {}", MAX_CANCEL_RATIO_VAR))?,
            None => defaults.max_cancel_ratio,
        };

        let scan = match lookup(SCAN_VAR) {
            Some(raw) => {
                ScanPolicy::from_str(&raw).context(format!("Failed to parse {}", SCAN_VAR))?
            }
            None => defaults.scan,
        };

        Ok(Self {
            window_ms,
            max_cancel_ratio,
            scan,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_detector_env_defaults() {
        let config = DetectorEnvConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.window_ms, 60_000);
        assert_eq!(config.max_cancel_ratio, dec!(0.33));
        assert_eq!(config.scan, ScanPolicy::Contiguous);
    }

    #[test]
    fn test_detector_env_overrides() {
        let config = DetectorEnvConfig::from_lookup(lookup_from(&[
            (WINDOW_MS_VAR, "30000"),
            (MAX_CANCEL_RATIO_VAR, "0.5"),
            (SCAN_VAR, "exhaustive"),
        ]))
        .unwrap();

        assert_eq!(config.window_ms, 30_000);
        assert_eq!(config.max_cancel_ratio, dec!(0.5));
        assert_eq!(config.scan, ScanPolicy::Exhaustive);
    }

    #[test]
    fn test_detector_env_rejects_garbage() {
        let err = DetectorEnvConfig::from_lookup(lookup_from(&[(WINDOW_MS_VAR, "a minute")]))
            .unwrap_err();
        assert!(err.to_string().contains(WINDOW_MS_VAR));

        assert!(
            DetectorEnvConfig::from_lookup(lookup_from(&[(MAX_CANCEL_RATIO_VAR, "a third")]))
                .is_err()
        );
        assert!(DetectorEnvConfig::from_lookup(lookup_from(&[(SCAN_VAR, "fast")])).is_err());
    }
}

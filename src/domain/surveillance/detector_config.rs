use crate::domain::errors::ConfigError;
use chrono::Duration;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_WINDOW_MS: i64 = 60_000;
pub const DEFAULT_MAX_CANCEL_RATIO: Decimal = dec!(0.33);

/// How the records around an anchor are collected into its window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ScanPolicy {
    /// Walk outward from the anchor and stop at the first record out of range.
    /// Only correct when each company's orders are time-ordered.
    #[default]
    Contiguous,
    /// Check every record of the company against the time bound.
    Exhaustive,
}

impl FromStr for ScanPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "contiguous" => Ok(ScanPolicy::Contiguous),
            "exhaustive" => Ok(ScanPolicy::Exhaustive),
            _ => Err(ConfigError::InvalidValue {
                key: "scan".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for ScanPolicy {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for ScanPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanPolicy::Contiguous => write!(f, "contiguous"),
            ScanPolicy::Exhaustive => write!(f, "exhaustive"),
        }
    }
}

/// Thresholds used by the excessive-cancellation detector.
///
/// `Default` gives a ±60s window and a 33% cancel ratio ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectorConfig {
    window: Duration,
    max_cancel_ratio: Decimal,
    scan: ScanPolicy,
}

impl DetectorConfig {
    /// Creates a config with validation
    ///
    /// # Arguments
    /// * `window_ms` - Half-width of the window around each anchor, in milliseconds (>= 0)
    /// * `max_cancel_ratio` - Ratio above which a window is excessive, in `[0, 1]`
    /// * `scan` - Window collection policy
    pub fn new(
        window_ms: i64,
        max_cancel_ratio: Decimal,
        scan: ScanPolicy,
    ) -> Result<Self, ConfigError> {
        let window = match Duration::try_milliseconds(window_ms) {
            Some(window) if window_ms >= 0 => window,
            _ => return Err(ConfigError::InvalidWindow { window_ms }),
        };

        if max_cancel_ratio < Decimal::ZERO || max_cancel_ratio > Decimal::ONE {
            return Err(ConfigError::InvalidRatio {
                ratio: max_cancel_ratio,
            });
        }

        Ok(Self {
            window,
            max_cancel_ratio,
            scan,
        })
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn window_ms(&self) -> i64 {
        self.window.num_milliseconds()
    }

    pub fn max_cancel_ratio(&self) -> Decimal {
        self.max_cancel_ratio
    }

    pub fn scan(&self) -> ScanPolicy {
        self.scan
    }

    pub fn with_scan(self, scan: ScanPolicy) -> Self {
        Self { scan, ..self }
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            window: Duration::milliseconds(DEFAULT_WINDOW_MS),
            max_cancel_ratio: DEFAULT_MAX_CANCEL_RATIO,
            scan: ScanPolicy::Contiguous,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DetectorConfig::default();
        assert_eq!(config.window_ms(), 60_000);
        assert_eq!(config.max_cancel_ratio(), dec!(0.33));
        assert_eq!(config.scan(), ScanPolicy::Contiguous);
    }

    #[test]
    fn test_valid_custom_config() {
        let config = DetectorConfig::new(5_000, dec!(0.5), ScanPolicy::Exhaustive).unwrap();
        assert_eq!(config.window(), Duration::seconds(5));
        assert_eq!(config.max_cancel_ratio(), dec!(0.5));
        assert_eq!(config.scan(), ScanPolicy::Exhaustive);
    }

    #[test]
    fn test_boundary_values_accepted() {
        assert!(DetectorConfig::new(0, dec!(0), ScanPolicy::Contiguous).is_ok());
        assert!(DetectorConfig::new(0, dec!(1), ScanPolicy::Contiguous).is_ok());
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            DetectorConfig::new(-1, dec!(0.33), ScanPolicy::Contiguous),
            Err(ConfigError::InvalidWindow { window_ms: -1 })
        ));
        assert!(matches!(
            DetectorConfig::new(60_000, dec!(1.01), ScanPolicy::Contiguous),
            Err(ConfigError::InvalidRatio { .. })
        ));
        assert!(matches!(
            DetectorConfig::new(60_000, dec!(-0.1), ScanPolicy::Contiguous),
            Err(ConfigError::InvalidRatio { .. })
        ));
    }

    #[test]
    fn test_scan_policy_from_str() {
        assert_eq!(
            "Exhaustive".parse::<ScanPolicy>().unwrap(),
            ScanPolicy::Exhaustive
        );
        assert_eq!(
            " contiguous ".parse::<ScanPolicy>().unwrap(),
            ScanPolicy::Contiguous
        );
        assert!("sorted".parse::<ScanPolicy>().is_err());
    }

    #[test]
    fn test_scan_policy_serde_accepts_any_case() {
        let policy: ScanPolicy = serde_json::from_str("\"Exhaustive\"").unwrap();
        assert_eq!(policy, ScanPolicy::Exhaustive);
        assert_eq!(
            serde_json::to_string(&ScanPolicy::Contiguous).unwrap(),
            "\"contiguous\""
        );
        assert!(serde_json::from_str::<ScanPolicy>("\"sorted\"").is_err());
    }
}

use crate::domain::errors::ConfigError;
use crate::domain::surveillance::ScanPolicy;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Detector thresholds read from a TOML file.
///
/// ```toml
/// window_ms = 60000
/// max_cancel_ratio = "0.33"
/// scan = "contiguous"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DetectorFileConfig {
    pub window_ms: Option<i64>,
    pub max_cancel_ratio: Option<RatioValue>,
    pub scan: Option<ScanPolicy>,
}

/// Ratio written either as a TOML string (exact) or a float
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RatioValue {
    Text(String),
    Float(f64),
}

impl RatioValue {
    pub fn to_decimal(&self) -> Result<Decimal, ConfigError> {
        let invalid = |value: String| ConfigError::InvalidValue {
            key: "max_cancel_ratio".to_string(),
            value,
        };

        match self {
            RatioValue::Text(raw) => {
                Decimal::from_str(raw.trim()).map_err(|_| invalid(raw.clone()))
            }
            RatioValue::Float(value) => {
                Decimal::from_str(&value.to_string()).map_err(|_| invalid(value.to_string()))
            }
        }
    }
}

impl DetectorFileConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|reason| ConfigError::Malformed {
            path: path.to_path_buf(),
            reason,
        })
    }

    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }
}

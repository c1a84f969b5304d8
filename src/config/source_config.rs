//! Order source location from environment variables.

use std::path::PathBuf;

pub const INPUT_VAR: &str = "CANCELWATCH_INPUT";
pub const CONFIG_VAR: &str = "CANCELWATCH_CONFIG";
pub const DEFAULT_INPUT_PATH: &str = "./data/trades.csv";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEnvConfig {
    pub input_path: PathBuf,
    pub config_file: Option<PathBuf>,
}

impl SourceEnvConfig {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            input_path: lookup(INPUT_VAR)
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_PATH)),
            config_file: lookup(CONFIG_VAR)
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from),
        }
    }
}

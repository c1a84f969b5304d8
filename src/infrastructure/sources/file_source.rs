use crate::domain::errors::SourceError;
use crate::domain::orders::{OrderRecord, parse_all_with_summary};
use crate::domain::ports::OrderSource;
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Reads an order log from a UTF-8 text file.
///
/// Invalid UTF-8 sequences are replaced with U+FFFD rather than failing the load.
pub struct FileOrderSource {
    path: PathBuf,
}

impl FileOrderSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OrderSource for FileOrderSource {
    fn load(&self) -> Result<Vec<OrderRecord>, SourceError> {
        let bytes = fs::read(&self.path).map_err(|source| SourceError::Unreadable {
            path: self.path.clone(),
            source,
        })?;

        let raw = String::from_utf8_lossy(&bytes);
        if matches!(raw, Cow::Owned(_)) {
            warn!("FileOrderSource: Replaced invalid UTF-8 in {:?}", self.path);
        }

        let summary = parse_all_with_summary(&raw);
        if summary.skipped > 0 {
            warn!(
                "FileOrderSource: Skipped {} malformed line(s) in {:?}",
                summary.skipped, self.path
            );
        }
        info!(
            "FileOrderSource: Loaded {} order(s) from {:?}",
            summary.records.len(),
            self.path
        );

        Ok(summary.records)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

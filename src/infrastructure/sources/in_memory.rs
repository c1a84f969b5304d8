//! In-memory order source.
//!
//! Holds already-available order data, either as raw lines or as parsed
//! records. Useful for tests and for callers that obtain the log elsewhere.

use crate::domain::errors::SourceError;
use crate::domain::orders::{OrderRecord, parse_all};
use crate::domain::ports::OrderSource;

pub struct InMemoryOrderSource {
    records: Vec<OrderRecord>,
}

impl InMemoryOrderSource {
    pub fn from_records(records: Vec<OrderRecord>) -> Self {
        Self { records }
    }

    /// Parses `lines` with the regular order-log rules; invalid lines are dropped.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let raw = lines
            .into_iter()
            .map(|line| line.as_ref().to_string())
            .collect::<Vec<_>>()
            .join("\n");
        Self::from_text(&raw)
    }

    pub fn from_text(raw: &str) -> Self {
        Self {
            records: parse_all(raw),
        }
    }
}

impl OrderSource for InMemoryOrderSource {
    fn load(&self) -> Result<Vec<OrderRecord>, SourceError> {
        Ok(self.records.clone())
    }

    fn describe(&self) -> String {
        format!("in-memory ({} orders)", self.records.len())
    }
}

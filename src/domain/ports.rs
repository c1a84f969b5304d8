use crate::domain::errors::SourceError;
use crate::domain::orders::OrderRecord;

/// Supplies parsed order records in input order.
///
/// Only an unavailable source is an error; malformed content is dropped by the
/// implementation.
pub trait OrderSource {
    fn load(&self) -> Result<Vec<OrderRecord>, SourceError>;

    /// Human-readable origin, for logs
    fn describe(&self) -> String;
}

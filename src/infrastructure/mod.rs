pub mod reporting;
pub mod sources;

pub use reporting::OutputFormat;
pub use sources::{FileOrderSource, InMemoryOrderSource};

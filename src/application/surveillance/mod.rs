pub mod cancellation_detector;

pub use cancellation_detector::{AnalysisReport, ExcessiveCancellationDetector};

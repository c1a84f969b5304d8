pub mod detector_config;
pub mod ratio;
pub mod window;

pub use detector_config::{DetectorConfig, ScanPolicy};
pub use ratio::{WindowStats, WindowTotals, evaluate};
pub use window::{TimeBound, is_time_ordered, window_around};

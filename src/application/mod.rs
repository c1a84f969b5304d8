// Excessive-cancellation surveillance
pub mod surveillance;

// Order log model, parsing and grouping
pub mod orders;

// Port interfaces
pub mod ports;

// Cancellation surveillance rules
pub mod surveillance;

// Domain-specific error types
pub mod errors;

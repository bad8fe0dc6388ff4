// --- File: crates/tutorlink_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error handling
pub mod logging; // Logging utilities

// Re-export error types and utilities for easier access
pub use error::{config_error, internal_error, storage_error, validation_error, TutorlinkError};

// Re-export logging utilities for easier access
pub use logging::{init, init_with_level};

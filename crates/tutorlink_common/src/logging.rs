//! Logging utilities for the Tutorlink application.
//!
//! This module provides a standardized approach to logging across all crates
//! in the Tutorlink application. It includes functions for initializing the
//! tracing subscriber used by the scheduler and its host dashboard.

use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber.
///
/// This function should be called at the start of the application to set up
/// logging. It configures the tracing subscriber with the specified log level
/// and formats log messages with timestamps, log levels, targets, and file/line
/// information.
///
/// # Examples
///
/// ```
/// use tutorlink_common::logging;
///
/// // Initialize with default log level (INFO)
/// logging::init();
///
/// // Initialize with a specific log level
/// logging::init_with_level(tracing::Level::DEBUG);
/// ```
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific log level.
///
/// # Arguments
///
/// * `level` - The minimum log level to display.
pub fn init_with_level(level: Level) {
    // Create a filter based on the specified level
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("tutorlink={}", level).parse().unwrap());

    // Initialize the subscriber with the filter
    // Use try_init to handle the case where a global default subscriber has already been set
    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter)
        .try_init();

    // Only log if initialization was successful or if it failed because a subscriber was already set
    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}

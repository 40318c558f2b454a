//! Shared logging utilities for consistent tracing across rotation commands

use crate::types::CommandId;
use chrono::{DateTime, Utc};
use tracing::{error, info};

/// Build the filter directive for the rotation crates at `base_level`
pub fn filter_directive(log_level: Option<&str>) -> String {
    let base_level = log_level.unwrap_or("info");
    format!("rotation={base_level},shared={base_level}")
}

/// Initialize the tracing subscriber with an optional log level.
///
/// Logs go to stderr; stdout carries command output such as dry-run YAML.
pub fn init_tracing_with_level(log_level: Option<&str>) {
    use tracing_subscriber::{EnvFilter, fmt};

    let directive = filter_directive(log_level);

    // A second init in the same process (tests) is not an error worth surfacing
    let _ = fmt()
        .with_env_filter(EnvFilter::new(&directive))
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

/// Initialize tracing at the default `info` level
pub fn init_tracing() {
    init_tracing_with_level(None);
}

/// Get formatted timestamp for consistent logging
pub fn format_timestamp() -> String {
    let now: DateTime<Utc> = Utc::now();
    now.format("%H:%M:%S%.3f").to_string()
}

/// Macro for command-aware info logging
#[macro_export]
macro_rules! command_info {
    ($command:expr, $($arg:tt)*) => {
        tracing::info!(
            command = %$command,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for command-aware warning logging
#[macro_export]
macro_rules! command_warn {
    ($command:expr, $($arg:tt)*) => {
        tracing::warn!(
            command = %$command,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for command-aware error logging
#[macro_export]
macro_rules! command_error {
    ($command:expr, $($arg:tt)*) => {
        tracing::error!(
            command = %$command,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for command-aware debug logging
#[macro_export]
macro_rules! command_debug {
    ($command:expr, $($arg:tt)*) => {
        tracing::debug!(
            command = %$command,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Contextual logging helper for startup messages
pub fn log_startup(command: &CommandId, details: &str) {
    info!(
        command = %command,
        timestamp = format_timestamp(),
        "🚀 Starting {}",
        details
    );
}

/// Contextual logging helper for error conditions
pub fn log_error(command: &CommandId, context: &str, error: &dyn std::fmt::Display) {
    error!(
        command = %command,
        timestamp = format_timestamp(),
        error = %error,
        "❌ {} failed: {}",
        context,
        error
    );
}

/// Contextual logging helper for success conditions
pub fn log_success(command: &CommandId, message: &str) {
    info!(
        command = %command,
        timestamp = format_timestamp(),
        "✅ {}",
        message
    );
}

/// Contextual logging helper for progress updates
pub fn log_progress(command: &CommandId, action: &str, details: &str) {
    info!(
        command = %command,
        timestamp = format_timestamp(),
        "📋 {}: {}",
        action,
        details
    );
}

//! Logging utilities for DBX codegen
//!
//! Code generation emits `tracing` events under the `codegen` target.
//! These helpers install a subscriber for binaries and tests.

#[cfg(feature = "logging")]
use tracing_subscriber::{EnvFilter, fmt};

/// Initialize logging with default settings
///
/// # Environment Variables
/// - `RUST_LOG` - Log level filter (default: "codegen=info")
///
/// # Example
/// ```rust
/// dbx_codegen::logging::init();
/// ```
#[cfg(feature = "logging")]
pub fn init() {
    init_with_level("info")
}

/// Initialize logging with a specific level
///
/// `RUST_LOG` wins when set; otherwise only `codegen` events at `level` or above.
///
/// # Arguments
/// * `level` - Log level (trace, debug, info, warn, error)
///
/// # Example
/// ```rust
/// dbx_codegen::logging::init_with_level("debug");
/// ```
#[cfg(feature = "logging")]
pub fn init_with_level(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(target_directive(level)));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .try_init();
}

/// Initialize logging for tests
///
/// Shows every generated fragment.
#[cfg(feature = "logging")]
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new(target_directive("trace")))
        .with_test_writer()
        .try_init();
}

// Stub implementations when logging feature is disabled
#[cfg(not(feature = "logging"))]
pub fn init() {}

#[cfg(not(feature = "logging"))]
pub fn init_with_level(_level: &str) {}

#[cfg(not(feature = "logging"))]
pub fn init_test() {}

/// Target of every event this crate emits.
pub const TARGET: &str = "codegen";

/// Filter directive enabling this crate's events at `level`.
pub fn target_directive(level: &str) -> String {
    format!("{}={}", TARGET, level.trim().to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_directive() {
        assert_eq!(target_directive("DEBUG"), "codegen=debug");
        assert_eq!(target_directive(" trace "), "codegen=trace");
    }

    #[test]
    fn test_init_is_repeatable() {
        init_test();
        init_test();
        tracing::debug!(target: "codegen", "subscriber installed");
    }
}

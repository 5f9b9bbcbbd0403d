//! Logging setup for the SPV client.
//!
//! The crate itself only emits `tracing` events; this module offers a small
//! console subscriber for binaries and examples that have no subscriber of
//! their own.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize console logging at the given level.
///
/// `RUST_LOG` overrides the level when set. Returns an error string if a
/// global subscriber is already installed.
pub fn init_console_logging(level: LevelFilter) -> Result<(), String> {
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| e.to_string())
}

//! Tracing and logging setup shared by hosts embedding the order model.

/// Initialize process-wide tracing from the environment.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Subscriber configuration (filter, output format).
pub mod config;

/// Tracing subscriber installation.
pub mod tracing;

pub use config::{LogFormat, ParseLogFormatError, TracingConfig};
pub use self::tracing::init_with;

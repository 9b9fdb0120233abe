//! Process-wide logging setup.

/// Initialize tracing for the process.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    subscriber::init(subscriber::LogFormat::from_env());
}

/// Subscriber configuration (filter, output format).
pub mod subscriber;

//! Tracing subscriber setup.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::mc::LogLevel;

/// Installs a global fmt subscriber filtered at `level`.
///
/// `RUST_LOG`, when set and valid, takes precedence over `level`. Returns
/// `false` if a global subscriber was already installed, in which case
/// nothing changes.
///
/// # Examples
///
/// ```rust
/// use shortrate_mc::mc::LogLevel;
/// use shortrate_mc::telemetry::init_tracing;
///
/// init_tracing(LogLevel::Warn);
/// // Second call is a no-op
/// assert!(!init_tracing(LogLevel::Debug));
/// ```
pub fn init_tracing(level: LogLevel) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_filter_str()));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .try_init()
        .is_ok()
}

//! Diagnostics output: one global `tracing` subscriber per process.

use std::io::{self, IsTerminal};

use once_cell::sync::OnceCell;
use tracing::{Subscriber, subscriber::SetGlobalDefaultError};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

use msglog_config::{Config, LogFormat};

static TELEMETRY_GUARD: OnceCell<()> = OnceCell::new();

/// Marker that the subscriber is installed.
#[derive(Debug, Default, Clone, Copy)]
pub struct TelemetryHandle;

/// Reasons the subscriber could not be installed.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// `log_filter` is not a valid `EnvFilter` directive.
    #[error("log filter is not valid: {0}")]
    Filter(String),
    /// Another global subscriber was installed first.
    #[error("a global subscriber is already installed: {0}")]
    Subscriber(SetGlobalDefaultError),
}

type BoxedSubscriber = Box<dyn Subscriber + Send + Sync>;

/// Installs the process-wide diagnostics subscriber.
///
/// The filter and format are checked on every call, but only the first
/// successful call installs anything; the subscriber cannot be replaced once
/// set.
///
/// # Errors
///
/// Returns [`TelemetryError::Filter`] for a filter that does not parse and
/// [`TelemetryError::Subscriber`] when another subscriber already owns the
/// process.
pub fn initialise(config: &Config) -> Result<TelemetryHandle, TelemetryError> {
    let subscriber = build_subscriber(config)?;
    TELEMETRY_GUARD
        .get_or_try_init(|| {
            tracing::subscriber::set_global_default(subscriber).map_err(TelemetryError::Subscriber)
        })
        .map(|_| TelemetryHandle)
}

fn build_subscriber(config: &Config) -> Result<BoxedSubscriber, TelemetryError> {
    let filter = EnvFilter::try_new(config.log_filter())
        .map_err(|error| TelemetryError::Filter(error.to_string()))?;

    let builder = |filter: EnvFilter| {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_level(true)
            .with_thread_ids(false)
            .with_thread_names(true)
            .with_writer(io::stderr)
            .with_ansi(io::stderr().is_terminal())
            .with_timer(fmt::time::UtcTime::rfc_3339())
    };

    let subscriber: BoxedSubscriber = match config.log_format() {
        LogFormat::Json => Box::new(builder(filter).json().flatten_event(true).finish()),
        LogFormat::Compact => Box::new(builder(filter).compact().finish()),
    };
    Ok(subscriber)
}

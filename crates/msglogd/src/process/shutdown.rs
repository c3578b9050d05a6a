//! Termination signals that end the collector's serving phase.

use std::io;
use std::os::raw::c_int;
use std::sync::{Mutex, PoisonError};

use signal_hook::consts::signal::{SIGHUP, SIGINT, SIGQUIT, SIGTERM};
use signal_hook::iterator::Signals;
use thiserror::Error;
use tracing::{info, warn};

use super::PROCESS_TARGET;

/// Signals that stop the collector.
pub const TERMINATION_SIGNALS: [c_int; 4] = [SIGTERM, SIGINT, SIGQUIT, SIGHUP];

/// Blocks the launch sequence until the daemon should stop.
pub trait ShutdownSignal: Send + Sync {
    /// Blocks until shutdown should proceed.
    fn wait(&self) -> Result<(), ShutdownError>;
}

/// Errors reported by shutdown signal listeners.
#[derive(Debug, Error)]
pub enum ShutdownError {
    /// Installing signal handlers failed.
    #[error("failed to install signal handlers: {source}")]
    Install {
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// The signal stream ended before any termination signal arrived.
    #[error("signal stream closed before a termination signal arrived")]
    Closed,
}

/// Shutdown listener backed by process signal handlers.
///
/// Handlers are registered by [`SystemShutdownSignal::install`], so a signal
/// delivered while the listener is still binding is queued rather than
/// terminating the process before the store is reported.
pub struct SystemShutdownSignal {
    signals: Mutex<Signals>,
}

impl SystemShutdownSignal {
    /// Registers handlers for [`TERMINATION_SIGNALS`].
    ///
    /// # Errors
    ///
    /// Returns [`ShutdownError::Install`] when the handlers cannot be
    /// registered.
    pub fn install() -> Result<Self, ShutdownError> {
        let signals =
            Signals::new(TERMINATION_SIGNALS).map_err(|source| ShutdownError::Install { source })?;
        Ok(Self {
            signals: Mutex::new(signals),
        })
    }
}

impl ShutdownSignal for SystemShutdownSignal {
    fn wait(&self) -> Result<(), ShutdownError> {
        let mut signals = self.signals.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(signal) = signals.forever().next() else {
            warn!(target: PROCESS_TARGET, "signal stream closed");
            return Err(ShutdownError::Closed);
        };
        info!(target: PROCESS_TARGET, signal, "shutdown signal received");
        Ok(())
    }
}

//! Defines the unified error surface for daemon launch and supervision.

use thiserror::Error;

use crate::bootstrap::BootstrapError;
use crate::transport::ListenerError;

use super::shutdown::ShutdownError;

/// Errors surfaced while launching or supervising the daemon process.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// Bootstrap failed.
    #[error(transparent)]
    Bootstrap(#[from] BootstrapError),
    /// The listener could not be started or stopped cleanly.
    #[error("listener failure: {0}")]
    Listener(#[from] ListenerError),
    /// Waiting for the shutdown signal failed.
    #[error("shutdown listener failure: {0}")]
    Shutdown(#[from] ShutdownError),
}

//! Lifecycle events of the collector, from bootstrap to shutdown.

use std::net::SocketAddr;

use crate::bootstrap::BootstrapError;
use crate::transport::ListenerError;

use msglog_config::Config;

const HEALTH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::health");

/// Receives collector lifecycle events.
pub trait HealthReporter: Send + Sync {
    /// Invoked before configuration loading begins.
    fn bootstrap_starting(&self);

    /// Invoked after bootstrap completes successfully.
    fn bootstrap_succeeded(&self, config: &Config);

    /// Invoked when bootstrap fails.
    fn bootstrap_failed(&self, error: &BootstrapError);

    /// Invoked once the listener accepts connections.
    fn listener_ready(&self, addr: SocketAddr);

    /// Invoked when the listener cannot be bound or started.
    fn listener_failed(&self, error: &ListenerError);

    /// Invoked when a shutdown signal has been received. `retained` is the
    /// number of messages the store holds at that moment; they are lost when
    /// the process exits.
    fn shutdown_requested(&self, retained: usize);
}

/// Reporter that logs each event under the `msglogd::health` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuredHealthReporter;

impl StructuredHealthReporter {
    /// Builds a new reporter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl HealthReporter for StructuredHealthReporter {
    fn bootstrap_starting(&self) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "bootstrap_starting",
            "starting collector bootstrap"
        );
    }

    fn bootstrap_succeeded(&self, config: &Config) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "bootstrap_succeeded",
            listen = %config.listen(),
            log_filter = %config.log_filter(),
            log_format = %config.log_format(),
            "collector bootstrap completed"
        );
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        tracing::error!(
            target: HEALTH_TARGET,
            event = "bootstrap_failed",
            error = %error,
            "collector bootstrap failed"
        );
    }

    fn listener_ready(&self, addr: SocketAddr) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "listener_ready",
            local_addr = %addr,
            "accepting client connections"
        );
    }

    fn listener_failed(&self, error: &ListenerError) {
        tracing::error!(
            target: HEALTH_TARGET,
            event = "listener_failed",
            error = %error,
            "listener failed to start"
        );
    }

    fn shutdown_requested(&self, retained: usize) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "shutdown_requested",
            messages_retained = retained,
            "stopping collector"
        );
    }
}

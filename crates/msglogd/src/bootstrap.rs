//! Turns a configuration source into a ready-to-listen collector.

use std::sync::Arc;

use ortho_config::OrthoError;
use thiserror::Error;

use msglog_config::Config;

use crate::dispatch::SessionHandler;
use crate::health::HealthReporter;
use crate::store::MessageStore;
use crate::telemetry::{self, TelemetryError, TelemetryHandle};
use crate::transport::{ListenerError, ListenerHandle, SocketListener};

/// Source of the collector configuration.
pub trait ConfigLoader: Send + Sync {
    /// Resolves the configuration.
    fn load(&self) -> Result<Config, Arc<OrthoError>>;
}

/// Reads process arguments, `MSGLOG_*` variables and the config file.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemConfigLoader;

impl ConfigLoader for SystemConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Config::load()
    }
}

/// Hands out a configuration resolved elsewhere, such as by an embedding
/// program.
#[derive(Debug, Clone)]
pub struct StaticConfigLoader {
    config: Config,
}

impl StaticConfigLoader {
    /// Serves `config` on every load.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(self.config.clone())
    }
}

/// Failures that stop the collector before it listens.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// A configuration layer was malformed.
    #[error("configuration could not be loaded: {source}")]
    Configuration {
        /// Underlying loader error.
        #[source]
        source: Arc<OrthoError>,
    },
    /// The diagnostics subscriber could not be installed.
    #[error("diagnostics could not be initialised: {source}")]
    Telemetry {
        /// Underlying telemetry error.
        #[source]
        source: TelemetryError,
    },
}

/// A collector whose configuration and diagnostics are in place.
///
/// The store is created here, before the listener accepts its first
/// connection, and every session writes to this one store.
pub struct Daemon {
    config: Config,
    store: MessageStore,
    telemetry: TelemetryHandle,
    reporter: Arc<dyn HealthReporter>,
}

impl Daemon {
    /// Resolved configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Message store shared by all sessions.
    #[must_use]
    pub fn store(&self) -> &MessageStore {
        &self.store
    }

    /// Proof that the diagnostics subscriber was installed.
    #[must_use]
    pub fn telemetry(&self) -> TelemetryHandle {
        self.telemetry
    }

    /// Session handler bound to this daemon's store.
    #[must_use]
    pub fn session_handler(&self) -> SessionHandler {
        SessionHandler::new(self.store.clone())
    }

    /// Binds `config().listen()` and serves sessions on a background thread.
    ///
    /// The outcome is reported as listener ready or listener failed.
    ///
    /// # Errors
    ///
    /// Returns the bind or thread spawn failure.
    pub fn start_listener(&self) -> Result<ListenerHandle, ListenerError> {
        let handler = Arc::new(self.session_handler());
        let started =
            SocketListener::bind(self.config.listen()).and_then(|listener| listener.start(handler));
        match &started {
            Ok(handle) => self.reporter.listener_ready(handle.local_addr()),
            Err(error) => self.reporter.listener_failed(error),
        }
        started
    }

    /// Tells the reporter the serving phase is over, with the number of
    /// messages still held.
    pub fn report_shutdown(&self) {
        self.reporter.shutdown_requested(self.store.len());
    }
}

/// Loads configuration, installs diagnostics and creates the store.
///
/// # Errors
///
/// Returns the first configuration or telemetry failure, after reporting it.
pub fn bootstrap_with(
    loader: &dyn ConfigLoader,
    reporter: Arc<dyn HealthReporter>,
) -> Result<Daemon, BootstrapError> {
    reporter.bootstrap_starting();
    match prepare(loader) {
        Ok((config, telemetry)) => {
            reporter.bootstrap_succeeded(&config);
            Ok(Daemon {
                config,
                store: MessageStore::new(),
                telemetry,
                reporter,
            })
        }
        Err(error) => {
            reporter.bootstrap_failed(&error);
            Err(error)
        }
    }
}

fn prepare(loader: &dyn ConfigLoader) -> Result<(Config, TelemetryHandle), BootstrapError> {
    let config = loader
        .load()
        .map_err(|source| BootstrapError::Configuration { source })?;
    let telemetry =
        telemetry::initialise(&config).map_err(|source| BootstrapError::Telemetry { source })?;
    Ok((config, telemetry))
}

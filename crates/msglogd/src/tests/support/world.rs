//! BDD test world: encapsulates loader, reporter, and daemon/bootstrap state for step functions.

use std::cell::RefCell;
use std::net::TcpListener;
use std::sync::Arc;

use crate::bootstrap::{BootstrapError, ConfigLoader, Daemon, bootstrap_with};
use crate::transport::{ListenerError, ListenerHandle};

use super::config_loader::{FailingConfigLoader, TestConfigLoader};
use super::reporter::RecordingHealthReporter;

/// Scenario world shared across BDD steps.
pub struct TestWorld {
    loader: Box<dyn ConfigLoader>,
    pub reporter: Arc<RecordingHealthReporter>,
    daemon: Option<Daemon>,
    bootstrap_error: Option<BootstrapError>,
    listener: Option<ListenerHandle>,
    listener_error: Option<ListenerError>,
    reserved: Option<TcpListener>,
}

impl TestWorld {
    /// Builds a world with a successful configuration loader.
    #[must_use]
    pub fn new() -> Self {
        Self {
            loader: Box::new(TestConfigLoader::new()),
            reporter: Arc::new(RecordingHealthReporter::default()),
            daemon: None,
            bootstrap_error: None,
            listener: None,
            listener_error: None,
            reserved: None,
        }
    }

    /// Installs a loader that always fails.
    pub fn use_failing_loader(&mut self) {
        self.loader = Box::new(FailingConfigLoader);
        self.reset_results();
    }

    /// Installs a loader that succeeds.
    pub fn use_successful_loader(&mut self) {
        self.loader = Box::new(TestConfigLoader::new());
        self.reset_results();
    }

    /// Installs a loader pointing at a port another socket already holds.
    pub fn use_occupied_port(&mut self) {
        let reserved = TcpListener::bind(("127.0.0.1", 0)).expect("bind reserved port");
        let port = reserved.local_addr().expect("reserved address").port();
        self.loader = Box::new(TestConfigLoader::with_port(port));
        self.reserved = Some(reserved);
        self.reset_results();
    }

    /// Runs the bootstrap sequence once.
    pub fn bootstrap(&mut self) {
        if self.daemon.is_some() || self.bootstrap_error.is_some() {
            return;
        }

        match bootstrap_with(&*self.loader, self.reporter.clone()) {
            Ok(daemon) => {
                self.daemon = Some(daemon);
            }
            Err(error) => {
                self.bootstrap_error = Some(error);
            }
        }
    }

    /// Starts the listener of a bootstrapped daemon.
    pub fn start_listener(&mut self) {
        let Some(daemon) = self.daemon.as_ref() else {
            return;
        };
        match daemon.start_listener() {
            Ok(handle) => self.listener = Some(handle),
            Err(error) => self.listener_error = Some(error),
        }
    }

    /// Returns whether bootstrap produced an error.
    #[must_use]
    pub fn bootstrap_error(&self) -> Option<&BootstrapError> {
        self.bootstrap_error.as_ref()
    }

    /// Returns the bootstrapped daemon, if any.
    #[must_use]
    pub fn daemon(&self) -> Option<&Daemon> {
        self.daemon.as_ref()
    }

    /// Returns the running listener, if any.
    #[must_use]
    pub fn listener(&self) -> Option<&ListenerHandle> {
        self.listener.as_ref()
    }

    /// Returns the listener start failure, if any.
    #[must_use]
    pub fn listener_error(&self) -> Option<&ListenerError> {
        self.listener_error.as_ref()
    }

    fn reset_results(&mut self) {
        self.stop_listener();
        self.daemon = None;
        self.bootstrap_error = None;
        self.listener_error = None;
    }

    fn stop_listener(&mut self) {
        if let Some(handle) = self.listener.take() {
            handle.shutdown();
            let _ = handle.join();
        }
    }
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TestWorld {
    fn drop(&mut self) {
        self.stop_listener();
    }
}

/// Default test world fixture.
#[must_use]
pub fn world() -> RefCell<TestWorld> {
    RefCell::new(TestWorld::new())
}

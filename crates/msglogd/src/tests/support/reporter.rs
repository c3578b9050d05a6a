//! Test double for [`HealthReporter`] that records structured events for assertions.

use std::net::SocketAddr;
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use crate::bootstrap::BootstrapError;
use crate::health::HealthReporter;
use crate::transport::ListenerError;

use msglog_config::Config;

/// Structured health events tracked during scenarios.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HealthEvent {
    /// Bootstrap started.
    BootstrapStarting,
    /// Bootstrap completed successfully.
    BootstrapSucceeded,
    /// Bootstrap failed with an error description.
    BootstrapFailed(String),
    /// The listener is accepting connections.
    ListenerReady(SocketAddr),
    /// The listener failed with an error description.
    ListenerFailed(String),
    /// A shutdown was requested while the store held `retained` messages.
    ShutdownRequested {
        /// Messages held at the time.
        retained: usize,
    },
}

/// Records health events for assertions.
#[derive(Debug, Default)]
pub struct RecordingHealthReporter {
    events: Mutex<Vec<HealthEvent>>,
}

impl RecordingHealthReporter {
    /// Captures a copy of the recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<HealthEvent> {
        self.events
            .lock()
            .expect("health reporter mutex poisoned")
            .clone()
    }

    pub fn record(&self, event: HealthEvent) {
        self.events
            .lock()
            .expect("health reporter mutex poisoned")
            .push(event);
    }

    /// Waits up to two seconds for the listener to report its address.
    #[must_use]
    pub fn wait_for_listener(&self) -> Option<SocketAddr> {
        let deadline = Instant::now() + Duration::from_secs(2);
        while Instant::now() < deadline {
            let ready = self.events().into_iter().find_map(|event| match event {
                HealthEvent::ListenerReady(addr) => Some(addr),
                _ => None,
            });
            if ready.is_some() {
                return ready;
            }
            thread::sleep(Duration::from_millis(10));
        }
        None
    }
}

impl HealthReporter for RecordingHealthReporter {
    fn bootstrap_starting(&self) {
        self.record(HealthEvent::BootstrapStarting);
    }

    fn bootstrap_succeeded(&self, _config: &Config) {
        self.record(HealthEvent::BootstrapSucceeded);
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        self.record(HealthEvent::BootstrapFailed(error.to_string()));
    }

    fn listener_ready(&self, addr: SocketAddr) {
        self.record(HealthEvent::ListenerReady(addr));
    }

    fn listener_failed(&self, error: &ListenerError) {
        self.record(HealthEvent::ListenerFailed(error.to_string()));
    }

    fn shutdown_requested(&self, retained: usize) {
        self.record(HealthEvent::ShutdownRequested { retained });
    }
}

//! Shutdown signal fired by the scenario instead of the operating system.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, PoisonError};

use crate::process::{ShutdownError, ShutdownSignal};

/// Clones share one channel: any clone may fire, any clone may wait.
#[derive(Clone)]
pub struct TestShutdownSignal {
    fire: Sender<()>,
    fired: Arc<Mutex<Receiver<()>>>,
}

impl TestShutdownSignal {
    #[must_use]
    pub fn new() -> Self {
        let (fire, fired) = mpsc::channel();
        Self {
            fire,
            fired: Arc::new(Mutex::new(fired)),
        }
    }

    /// Releases one pending or future `wait`.
    pub fn trigger(&self) {
        // The receiver lives as long as any clone, including this one.
        let _ = self.fire.send(());
    }
}

impl ShutdownSignal for TestShutdownSignal {
    fn wait(&self) -> Result<(), ShutdownError> {
        let fired = self.fired.lock().unwrap_or_else(PoisonError::into_inner);
        fired.recv().map_err(|_| ShutdownError::Closed)
    }
}

//! Test configuration loaders for scenarios covering success and failure paths.

use std::ffi::OsString;
use std::sync::Arc;

use ortho_config::OrthoError;

use msglog_config::{Config, ListenEndpoint};

use crate::bootstrap::ConfigLoader;

/// Loader that listens on an ephemeral loopback port.
#[derive(Debug, Clone)]
pub struct TestConfigLoader {
    endpoint: ListenEndpoint,
}

impl TestConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            endpoint: ListenEndpoint::tcp("127.0.0.1", 0),
        }
    }

    /// Loader whose endpoint is `port` on loopback.
    #[must_use]
    pub fn with_port(port: u16) -> Self {
        Self {
            endpoint: ListenEndpoint::tcp("127.0.0.1", port),
        }
    }
}

impl ConfigLoader for TestConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(Config {
            listen: self.endpoint.clone(),
            ..Config::default()
        })
    }
}

/// Loader that intentionally fails by passing invalid CLI arguments.
pub struct FailingConfigLoader;

impl ConfigLoader for FailingConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        let args = vec![
            OsString::from("msglogd"),
            OsString::from("--listen"),
            OsString::from("udp://127.0.0.1:9876"),
        ];
        Config::load_from_iter(args)
    }
}

//! Shared configuration for the message log collector.
//!
//! Configuration is layered with `ortho_config`: built-in defaults, an
//! optional TOML file (`--config-path` or `MSGLOG_CONFIG_PATH`), `MSGLOG_*`
//! environment variables, and finally command-line flags. Later layers win.
//!
//! ```toml
//! listen = { transport = "tcp", host = "127.0.0.1", port = 9876 }
//! log_filter = "msglogd=debug"
//! log_format = "compact"
//! ```

mod defaults;
mod endpoint;
mod logging;

use std::ffi::OsString;
use std::sync::Arc;

use ortho_config::{OrthoConfig, OrthoError};
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_LISTEN_HOST, DEFAULT_LISTEN_PORT, DEFAULT_LOG_FILTER, default_listen_endpoint,
    default_log_filter, default_log_filter_string, default_log_format,
};
pub use endpoint::{EndpointParseError, ListenEndpoint};
pub use logging::{LogFormat, LogFormatParseError};

/// Resolved daemon configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "MSGLOG")]
pub struct Config {
    /// Endpoint the collector accepts client connections on.
    #[serde(default = "default_listen_endpoint")]
    #[ortho_config(default = default_listen_endpoint())]
    pub listen: ListenEndpoint,
    /// `tracing` filter directive applied to diagnostics.
    #[serde(default = "default_log_filter_string")]
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,
    /// Output format for diagnostics.
    #[serde(default = "default_log_format")]
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: default_listen_endpoint(),
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
        }
    }
}

impl Config {
    /// Loads configuration from the process arguments, environment and
    /// configuration file, falling back to built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns the loader error when any layer is malformed.
    pub fn load() -> Result<Self, Arc<OrthoError>> {
        <Self as OrthoConfig>::load()
    }

    /// Loads configuration using `args` in place of the process arguments.
    /// The first item is the program name.
    ///
    /// # Errors
    ///
    /// Returns the loader error when any layer is malformed.
    pub fn load_from_iter<I, T>(args: I) -> Result<Self, Arc<OrthoError>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as OrthoConfig>::load_from_iter(args)
    }

    /// Endpoint the collector listens on.
    #[must_use]
    pub fn listen(&self) -> &ListenEndpoint {
        &self.listen
    }

    /// Filter expression for the diagnostics subscriber.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Output format for the diagnostics subscriber.
    #[must_use]
    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }
}

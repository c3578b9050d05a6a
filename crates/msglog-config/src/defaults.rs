use crate::endpoint::ListenEndpoint;

/// Default host the collector listens on (all IPv4 interfaces).
pub const DEFAULT_LISTEN_HOST: &str = "0.0.0.0";

/// Default TCP port for the collector.
pub const DEFAULT_LISTEN_PORT: u16 = 9876;

/// Default log filter expression used by the daemon.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default log filter expression used by the daemon.
#[must_use]
pub fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the daemon.
#[must_use]
pub fn default_log_format() -> crate::logging::LogFormat {
    crate::logging::LogFormat::Json
}

/// Computes the default listening endpoint for the daemon.
#[must_use]
pub fn default_listen_endpoint() -> ListenEndpoint {
    ListenEndpoint::tcp(DEFAULT_LISTEN_HOST, DEFAULT_LISTEN_PORT)
}

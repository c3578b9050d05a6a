//! Network log collector daemon.
//!
//! Clients connect over TCP and send one request per `\r\n`-terminated line.
//! Requests append a message, dump every message at or above a priority, or
//! clear the collection. All connections share one in-memory
//! [`MessageStore`]; each connection is served by its own thread and applies
//! its requests in order.
//!
//! The bootstrap sequence loads configuration through [`msglog_config`],
//! installs structured telemetry and creates the store before the listener
//! accepts its first client. Health reporting hooks emit structured events at
//! each stage so operators can diagnose failures quickly.

mod bootstrap;
mod dispatch;
mod health;
mod model;
mod process;
mod store;
mod telemetry;
mod transport;

pub use bootstrap::{
    BootstrapError, ConfigLoader, Daemon, StaticConfigLoader, SystemConfigLoader, bootstrap_with,
};
pub use dispatch::{
    Command, CommandRouter, DispatchOutcome, ParseError, ResponseWriter, ResultCode, SessionEnd,
    SessionHandler, SessionSummary, Verb, sanitize_line,
};
pub use health::{HealthReporter, StructuredHealthReporter};
pub use model::{Message, Priority, UnknownPriority};
pub use process::{
    LaunchError, LaunchPlan, ShutdownError, ShutdownSignal, SystemShutdownSignal,
    TERMINATION_SIGNALS, run_daemon, run_daemon_with,
};
pub use store::{Dump, MessageStore};
pub use telemetry::{TelemetryError, TelemetryHandle};
pub use transport::{
    ConnectionHandler, ConnectionStream, DELIMITER, FramingError, LineReader, ListenerError,
    ListenerHandle, MAX_LINE_BYTES, SocketListener,
};

#[cfg(test)]
mod tests;

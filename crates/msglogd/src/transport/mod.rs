//! TCP listener and line framing for collector connections.
//!
//! The transport binds the configured endpoint and accepts connections in a
//! background thread. Each accepted connection is served on its own thread
//! by a [`ConnectionHandler`].

mod errors;
mod framing;
mod handler;
mod listener;

pub use self::errors::{FramingError, ListenerError};
pub use self::framing::{DELIMITER, LineReader, MAX_LINE_BYTES};
pub use self::handler::{ConnectionHandler, ConnectionStream};
pub use self::listener::{ListenerHandle, SocketListener};

const LISTENER_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::transport");

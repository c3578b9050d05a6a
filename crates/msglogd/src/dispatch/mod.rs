//! Line-protocol request handling.
//!
//! Clients send one request per `\r\n`-terminated line:
//!
//! ```text
//! new_log <author> <priority> <body...>
//! dump_all <priority>
//! delete_all
//! ```
//!
//! `new_log` and `delete_all` produce no reply. `dump_all` replies with one
//! `u[<author>] p[<priority>] m[<body>]` line per stored message whose
//! priority is at least the requested threshold, oldest first, with no
//! header or terminator. Malformed requests are dropped and the connection
//! stays open.

mod errors;
mod handler;
mod request;
mod response;
mod router;
mod sanitize;

pub use self::errors::{ParseError, ResultCode};
pub use self::handler::{SessionEnd, SessionHandler, SessionSummary};
pub use self::request::{Command, Verb};
pub use self::response::ResponseWriter;
pub use self::router::{CommandRouter, DispatchOutcome};
pub use self::sanitize::sanitize_line;

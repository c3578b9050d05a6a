//! Per-connection session loop.
//!
//! A session reads one `\r\n`-delimited line at a time, sanitises it, parses
//! it into a [`Command`] and dispatches it against the shared store. Parse
//! failures never end a session; only disconnection or a transport failure
//! does. Requests on one connection are applied strictly in the order they
//! arrive.

use std::io::{self, Read, Write};

use tracing::{debug, warn};

use crate::store::MessageStore;
use crate::transport::{ConnectionHandler, ConnectionStream, LineReader};

use super::errors::ResultCode;
use super::request::Command;
use super::response::ResponseWriter;
use super::router::{CommandRouter, DispatchOutcome};
use super::sanitize::sanitize_line;

/// Tracing target for session activity.
pub(crate) const SESSION_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::session");

/// Why a session stopped reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The client closed its side of the connection.
    Disconnected,
    /// Reading or writing failed, or a request line was too long.
    TransportFailed,
}

/// What happened over the lifetime of one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    /// Requests that parsed and were dispatched.
    pub applied: usize,
    /// Lines that were blank after sanitisation.
    pub ignored: usize,
    /// Result codes of rejected requests, in arrival order.
    pub rejected: Vec<ResultCode>,
    /// Reason the session ended.
    pub end: SessionEnd,
}

/// Connection handler that runs the request loop against a shared store.
#[derive(Debug, Clone)]
pub struct SessionHandler {
    router: CommandRouter,
    reply_errors: bool,
}

impl SessionHandler {
    /// Creates a handler whose sessions share `store`.
    ///
    /// Rejected requests produce no reply.
    #[must_use]
    pub fn new(store: MessageStore) -> Self {
        Self {
            router: CommandRouter::new(store),
            reply_errors: false,
        }
    }

    /// Enables or disables `error: <explanation>` replies for rejected
    /// requests.
    #[must_use]
    pub fn with_error_replies(mut self, reply_errors: bool) -> Self {
        self.reply_errors = reply_errors;
        self
    }

    /// Store the sessions mutate.
    #[must_use]
    pub fn store(&self) -> &MessageStore {
        self.router.store()
    }

    /// Runs the request loop until `reader` is exhausted or I/O fails.
    pub fn serve<R: Read, W: Write>(&self, reader: R, writer: W) -> SessionSummary {
        let mut lines = LineReader::new(reader);
        let mut responses = ResponseWriter::new(writer);
        let mut tally = Tally::default();

        loop {
            let raw = match lines.next_line() {
                Ok(Some(raw)) => raw,
                Ok(None) => return tally.finish(SessionEnd::Disconnected),
                Err(error) => {
                    warn!(target: SESSION_TARGET, %error, "failed to read request");
                    return tally.finish(SessionEnd::TransportFailed);
                }
            };

            if let Err(error) = self.process_line(&raw, &mut responses, &mut tally) {
                warn!(target: SESSION_TARGET, %error, "failed to write response");
                return tally.finish(SessionEnd::TransportFailed);
            }
        }
    }

    fn process_line<W: Write>(
        &self,
        raw: &str,
        responses: &mut ResponseWriter<W>,
        tally: &mut Tally,
    ) -> io::Result<()> {
        let line = sanitize_line(raw);
        if line.is_empty() {
            tally.ignored += 1;
            return Ok(());
        }

        let parsed = Command::parse(&line);
        let code = ResultCode::of(&parsed);
        match parsed {
            Ok(command) => {
                debug!(target: SESSION_TARGET, %code, %command, "request parsed");
                tally.applied += 1;
                match self.router.dispatch(command) {
                    DispatchOutcome::Silent => Ok(()),
                    DispatchOutcome::Report(dump) => {
                        let written = responses.write_dump(dump)?;
                        debug!(target: SESSION_TARGET, lines = written, "dump written");
                        Ok(())
                    }
                }
            }
            Err(error) => {
                debug!(
                    target: SESSION_TARGET,
                    %code,
                    explanation = %error,
                    "request rejected"
                );
                tally.rejected.push(code);
                if self.reply_errors {
                    responses.write_error(&error)?;
                }
                Ok(())
            }
        }
    }
}

impl ConnectionHandler for SessionHandler {
    fn handle(&self, stream: ConnectionStream) {
        let peer = stream.peer_addr();
        debug!(target: SESSION_TARGET, peer = ?peer, "session opened");
        let summary = self.serve(&stream, &stream);
        debug!(
            target: SESSION_TARGET,
            peer = ?peer,
            applied = summary.applied,
            rejected = summary.rejected.len(),
            ignored = summary.ignored,
            end = ?summary.end,
            "session closed"
        );
        if matches!(summary.end, SessionEnd::TransportFailed) {
            // Unread request bytes may still be queued; end both halves now.
            if let Err(error) = stream.close() {
                debug!(target: SESSION_TARGET, peer = ?peer, %error, "socket shutdown failed");
            }
        }
    }
}

#[derive(Debug, Default)]
struct Tally {
    applied: usize,
    ignored: usize,
    rejected: Vec<ResultCode>,
}

impl Tally {
    fn finish(self, end: SessionEnd) -> SessionSummary {
        SessionSummary {
            applied: self.applied,
            ignored: self.ignored,
            rejected: self.rejected,
            end,
        }
    }
}

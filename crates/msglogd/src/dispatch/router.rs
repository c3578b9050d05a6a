//! Applies parsed commands to the message store.

use crate::store::{Dump, MessageStore};

use super::request::Command;

/// Effect of dispatching one command, as seen by the session.
#[derive(Debug)]
pub enum DispatchOutcome {
    /// Nothing is written back to the client.
    Silent,
    /// Rendered lines to write back to the client.
    Report(Dump),
}

/// Routes commands to the store operation they name.
///
/// Dispatch of a well-formed command cannot fail. The store lock is held only
/// inside the store call, so a `Report` is written after it is released.
#[derive(Debug, Clone)]
pub struct CommandRouter {
    store: MessageStore,
}

impl CommandRouter {
    /// Creates a router over a shared store handle.
    #[must_use]
    pub fn new(store: MessageStore) -> Self {
        Self { store }
    }

    /// Store this router mutates.
    #[must_use]
    pub fn store(&self) -> &MessageStore {
        &self.store
    }

    /// Executes `command` against the store.
    pub fn dispatch(&self, command: Command) -> DispatchOutcome {
        match command {
            Command::NewLog { message } => {
                self.store.append(message);
                DispatchOutcome::Silent
            }
            Command::DumpAll { threshold } => {
                DispatchOutcome::Report(self.store.dump_filtered(threshold))
            }
            Command::DeleteAll => {
                self.store.clear();
                DispatchOutcome::Silent
            }
        }
    }
}

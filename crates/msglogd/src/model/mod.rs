//! Log record types shared by the parser, the store and dispatch.

mod message;
mod priority;

pub use message::Message;
pub use priority::{Priority, UnknownPriority};

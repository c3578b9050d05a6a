//! Process-wide message store shared by every client session.
//!
//! The store is a single insertion-ordered sequence behind one exclusive
//! lock. Appends, filtered dumps and clears are mutually exclusive, and each
//! holds the lock only for the in-memory work: [`MessageStore::dump_filtered`]
//! renders matching messages while locked and hands the lines back as an
//! owned iterator, so callers write them to the network after the lock is
//! released.

use std::iter::FusedIterator;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::model::{Message, Priority};

/// Cheaply cloneable handle to a shared message sequence.
///
/// Clones observe and mutate the same sequence. Independent stores are
/// created with [`MessageStore::new`].
#[derive(Debug, Clone, Default)]
pub struct MessageStore {
    messages: Arc<Mutex<Vec<Message>>>,
}

impl MessageStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `message` to the end of the sequence.
    pub fn append(&self, message: Message) {
        self.lock().push(message);
    }

    /// Renders every message at or above `threshold`, in insertion order.
    ///
    /// The returned iterator owns its lines; it is finite and cannot be
    /// restarted.
    #[must_use]
    pub fn dump_filtered(&self, threshold: Priority) -> Dump {
        let lines: Vec<String> = self
            .lock()
            .iter()
            .filter(|message| message.priority().meets(threshold))
            .map(ToString::to_string)
            .collect();
        Dump {
            lines: lines.into_iter(),
        }
    }

    /// Removes every message.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Number of stored messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` when no messages are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // Every operation is a single push, clear or read, so a panic in another
    // holder cannot leave the vector half-updated.
    fn lock(&self) -> MutexGuard<'_, Vec<Message>> {
        self.messages.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Rendered lines produced by [`MessageStore::dump_filtered`].
#[derive(Debug)]
pub struct Dump {
    lines: std::vec::IntoIter<String>,
}

impl Iterator for Dump {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.lines.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.lines.size_hint()
    }
}

impl ExactSizeIterator for Dump {}

impl FusedIterator for Dump {}

#[cfg(test)]
mod tests {
    use std::thread;

    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn store() -> MessageStore {
        MessageStore::new()
    }

    fn one_of_each(store: &MessageStore) {
        for priority in Priority::ALL {
            store.append(Message::new(
                format!("{priority} event"),
                "tester",
                priority,
            ));
        }
    }

    #[rstest]
    fn dump_preserves_insertion_order(store: MessageStore) {
        store.append(Message::new("first", "a", Priority::Info));
        store.append(Message::new("second", "b", Priority::Debug));
        store.append(Message::new("third", "c", Priority::Error));

        let lines: Vec<String> = store.dump_filtered(Priority::Debug).collect();
        assert_eq!(
            lines,
            vec![
                "u[a] p[info] m[first]",
                "u[b] p[debug] m[second]",
                "u[c] p[error] m[third]",
            ]
        );
    }

    #[rstest]
    fn warning_threshold_keeps_three_most_severe(store: MessageStore) {
        one_of_each(&store);

        let lines: Vec<String> = store.dump_filtered(Priority::Warning).collect();
        assert_eq!(
            lines,
            vec![
                "u[tester] p[warning] m[warning event]",
                "u[tester] p[critical] m[critical event]",
                "u[tester] p[error] m[error event]",
            ]
        );
    }

    #[rstest]
    fn raising_the_threshold_yields_an_ordered_subset(store: MessageStore) {
        one_of_each(&store);
        one_of_each(&store);

        for (low_index, low) in Priority::ALL.into_iter().enumerate() {
            let wider: Vec<String> = store.dump_filtered(low).collect();
            for high in Priority::ALL.into_iter().skip(low_index) {
                let narrower: Vec<String> = store.dump_filtered(high).collect();
                let mut remaining = wider.iter();
                assert!(
                    narrower
                        .iter()
                        .all(|line| remaining.any(|candidate| candidate == line)),
                    "{high} dump is not an ordered subset of {low} dump"
                );
            }
        }
    }

    #[rstest]
    fn dump_reports_exact_length(store: MessageStore) {
        one_of_each(&store);
        let dump = store.dump_filtered(Priority::Critical);
        assert_eq!(dump.len(), 2);
    }

    #[rstest]
    fn dump_is_a_snapshot(store: MessageStore) {
        store.append(Message::new("before", "a", Priority::Info));
        let dump = store.dump_filtered(Priority::Debug);
        store.append(Message::new("after", "a", Priority::Info));
        assert_eq!(dump.count(), 1);
    }

    #[rstest]
    fn clear_empties_the_store(store: MessageStore) {
        one_of_each(&store);
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.dump_filtered(Priority::Debug).count(), 0);
    }

    #[rstest]
    fn clones_share_state(store: MessageStore) {
        let other = store.clone();
        other.append(Message::new("shared", "a", Priority::Warning));
        assert_eq!(store.len(), 1);
        assert_eq!(MessageStore::new().len(), 0);
    }

    #[rstest]
    fn concurrent_appends_are_all_kept(store: MessageStore) {
        const THREADS: usize = 32;
        const PER_THREAD: usize = 500;
        const BODY: &str = "abcdefghijklmnopqrstuvwxyz";

        let workers: Vec<_> = (0..THREADS)
            .map(|id| {
                let store = store.clone();
                thread::spawn(move || {
                    for _ in 0..PER_THREAD {
                        store.append(Message::new(BODY, id.to_string(), Priority::Critical));
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().expect("worker thread panicked");
        }

        assert_eq!(store.len(), THREADS * PER_THREAD);
        let mut per_author = vec![0_usize; THREADS];
        for line in store.dump_filtered(Priority::Debug) {
            assert!(line.ends_with(&format!("p[critical] m[{BODY}]")), "{line}");
            let author: usize = line
                .trim_start_matches("u[")
                .split(']')
                .next()
                .and_then(|id| id.parse().ok())
                .expect("author should be a thread id");
            per_author[author] += 1;
        }
        assert!(per_author.iter().all(|count| *count == PER_THREAD));
    }
}

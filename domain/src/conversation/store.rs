//! The conversation store — ordered, observable, in-memory.
//!
//! Append-only sequence of [`MessageRecord`]s with a narrow mutation surface:
//! [`append`](ConversationStore::append) and
//! [`replace_last`](ConversationStore::replace_last). Subscribers are
//! notified synchronously after every mutation so the presentation layer can
//! refresh its display and scroll to the bottom. There is no deletion, no
//! reordering, and no persistence across runs.

use super::entities::MessageRecord;

/// What changed in the store, with the index of the affected record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreChange {
    Appended(usize),
    Updated(usize),
}

/// Result of a [`ConversationStore::replace_last`] call.
///
/// `NoMatch` means the caller's expectation about store state was wrong
/// (e.g. no pending assistant record where one was expected). The store
/// itself stays silent; callers log the warning so the UI never crashes
/// over an inconsistency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum ReplaceOutcome {
    Replaced(usize),
    NoMatch,
}

type Listener = Box<dyn Fn(&[MessageRecord], StoreChange) + Send>;

/// Ordered conversation state (Aggregate)
#[derive(Default)]
pub struct ConversationStore {
    records: Vec<MessageRecord>,
    listeners: Vec<Listener>,
}

impl std::fmt::Debug for ConversationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationStore")
            .field("records", &self.records)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[MessageRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Register a change listener.
    ///
    /// Listeners are called synchronously after each mutation with the full
    /// record slice and the change that occurred.
    pub fn subscribe(&mut self, listener: impl Fn(&[MessageRecord], StoreChange) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Add a record to the end of the conversation.
    pub fn append(&mut self, record: MessageRecord) {
        self.records.push(record);
        self.notify(StoreChange::Appended(self.records.len() - 1));
    }

    /// Replace the last record satisfying `predicate` with `updater(record)`.
    ///
    /// Scans from the end. Under the single-loading-record invariant only the
    /// final record ever matches, but the scan keeps the operation total. If
    /// nothing matches this is a no-op returning [`ReplaceOutcome::NoMatch`].
    pub fn replace_last<P, U>(&mut self, predicate: P, updater: U) -> ReplaceOutcome
    where
        P: Fn(&MessageRecord) -> bool,
        U: FnOnce(MessageRecord) -> MessageRecord,
    {
        let Some(index) = self.records.iter().rposition(predicate) else {
            return ReplaceOutcome::NoMatch;
        };
        let record = self.records[index].clone();
        self.records[index] = updater(record);
        self.notify(StoreChange::Updated(index));
        ReplaceOutcome::Replaced(index)
    }

    /// True if any record is still a loading placeholder.
    pub fn has_loading(&self) -> bool {
        self.records.iter().any(|r| r.loading)
    }

    fn notify(&self, change: StoreChange) {
        for listener in &self.listeners {
            listener(&self.records, change);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::entities::Sender;
    use std::sync::{Arc, Mutex};

    #[test]
    fn append_preserves_insertion_order() {
        let mut store = ConversationStore::new();
        store.append(MessageRecord::user("first"));
        store.append(MessageRecord::user("second"));

        let contents: Vec<&str> = store.records().iter().map(|r| r.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second"]);
    }

    #[test]
    fn replace_last_targets_last_matching_record() {
        let mut store = ConversationStore::new();
        store.append(MessageRecord::user("hi"));
        store.append(MessageRecord::assistant_loading());

        let outcome = store.replace_last(
            |r| r.sender == Sender::Assistant,
            |r| r.with_content("Hel"),
        );

        assert_eq!(outcome, ReplaceOutcome::Replaced(1));
        assert_eq!(store.records()[1].content, "Hel");
        assert!(!store.records()[1].loading);
        // The user record is untouched.
        assert_eq!(store.records()[0].content, "hi");
    }

    #[test]
    fn replace_last_scans_from_the_end() {
        let mut store = ConversationStore::new();
        store.append(MessageRecord::user("a"));
        store.append(MessageRecord::assistant_loading().with_content("old answer"));
        store.append(MessageRecord::user("b"));
        store.append(MessageRecord::assistant_loading());

        let outcome = store.replace_last(|r| r.sender == Sender::Assistant, |r| {
            r.with_content("new answer")
        });

        assert_eq!(outcome, ReplaceOutcome::Replaced(3));
        // The earlier assistant record keeps its content.
        assert_eq!(store.records()[1].content, "old answer");
        assert_eq!(store.records()[3].content, "new answer");
    }

    #[test]
    fn replace_last_without_match_is_a_noop() {
        let mut store = ConversationStore::new();
        store.append(MessageRecord::user("hi"));

        let outcome = store.replace_last(|r| r.loading, |r| r.with_content("x"));

        assert_eq!(outcome, ReplaceOutcome::NoMatch);
        assert_eq!(store.records()[0].content, "hi");
    }

    #[test]
    fn listeners_observe_appends_and_updates() {
        let seen: Arc<Mutex<Vec<StoreChange>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let mut store = ConversationStore::new();
        store.subscribe(move |_records, change| sink.lock().unwrap().push(change));

        store.append(MessageRecord::user("hi"));
        store.append(MessageRecord::assistant_loading());
        let _ = store.replace_last(|r| r.loading, |r| r.with_content("Hello!"));

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                StoreChange::Appended(0),
                StoreChange::Appended(1),
                StoreChange::Updated(1),
            ]
        );
    }

    #[test]
    fn listener_sees_records_after_the_mutation() {
        let last_len = Arc::new(Mutex::new(0usize));
        let sink = Arc::clone(&last_len);

        let mut store = ConversationStore::new();
        store.subscribe(move |records, _| *sink.lock().unwrap() = records.len());

        store.append(MessageRecord::user("hi"));
        assert_eq!(*last_len.lock().unwrap(), 1);
    }

    #[test]
    fn has_loading_tracks_placeholder_lifecycle() {
        let mut store = ConversationStore::new();
        assert!(!store.has_loading());

        store.append(MessageRecord::assistant_loading());
        assert!(store.has_loading());

        let _ = store.replace_last(|r| r.loading, |r| r.with_content("done"));
        assert!(!store.has_loading());
    }
}

use async_trait::async_trait;
use thiserror::Error;

use super::domain::Entry;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Durable, ordered collection of guestbook entries.
///
/// Implementations assign `id`s in strictly increasing order and must have
/// persisted an entry before `append` returns. Validation and trimming
/// belong to the caller; stores only refuse empty strings.
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// All entries, newest (highest `id`) first. An empty store is `Ok(vec![])`.
    async fn list(&self) -> Result<Vec<Entry>, StoreError>;
    /// Persist a new entry and return it with its assigned `id`.
    async fn append(&self, name: &str, message: &str, date: &str) -> Result<Entry, StoreError>;
    /// Short label for logs.
    fn backend(&self) -> &'static str;
}

/// Shared argument check for store implementations.
pub fn require_non_empty(name: &str, message: &str) -> Result<(), StoreError> {
    if name.is_empty() {
        return Err(StoreError::InvalidArgument("name must not be empty".into()));
    }
    if message.is_empty() {
        return Err(StoreError::InvalidArgument("message must not be empty".into()));
    }
    Ok(())
}

/// In-memory store for tests, benches and doc examples.
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use tokio::sync::Mutex;

    #[derive(Default)]
    pub struct MockEntryStore {
        entries: Mutex<Vec<Entry>>,
        failing: AtomicBool,
        append_calls: AtomicUsize,
    }

    impl MockEntryStore {
        /// A store whose every operation fails with `Unavailable`.
        pub fn failing() -> Self {
            let store = Self::default();
            store.set_failing(true);
            store
        }

        pub fn set_failing(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }

        /// Number of times `append` reached the store, including failed calls.
        pub fn append_calls(&self) -> usize {
            self.append_calls.load(Ordering::SeqCst)
        }

        fn check_available(&self) -> Result<(), StoreError> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(StoreError::Unavailable("mock store is offline".into()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl EntryStore for MockEntryStore {
        async fn list(&self) -> Result<Vec<Entry>, StoreError> {
            self.check_available()?;
            let entries = self.entries.lock().await;
            Ok(entries.iter().rev().cloned().collect())
        }

        async fn append(&self, name: &str, message: &str, date: &str) -> Result<Entry, StoreError> {
            self.append_calls.fetch_add(1, Ordering::SeqCst);
            self.check_available()?;
            require_non_empty(name, message)?;
            let mut entries = self.entries.lock().await;
            let id = entries.last().map(|e| e.id + 1).unwrap_or(1);
            let entry = Entry { id, name: name.to_string(), message: message.to_string(), date: date.to_string() };
            entries.push(entry.clone());
            Ok(entry)
        }

        fn backend(&self) -> &'static str { "memory" }
    }
}

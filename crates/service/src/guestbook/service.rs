use std::sync::Arc;

use tracing::{error, info, instrument};

use super::domain::{today_stamp, Entry};
use super::store::EntryStore;
use crate::errors::ServiceError;

/// Validation boundary between transport handlers and the entry store.
/// Holds no entry state of its own; every call reads or writes through.
pub struct GuestbookService<S: EntryStore + ?Sized = dyn EntryStore> {
    store: Arc<S>,
    clock: fn() -> String,
}

impl<S: EntryStore + ?Sized> GuestbookService<S> {
    pub fn new(store: Arc<S>) -> Self { Self { store, clock: today_stamp } }

    /// Replace the date source; used to pin stamps in tests.
    pub fn with_clock(mut self, clock: fn() -> String) -> Self {
        self.clock = clock;
        self
    }

    pub fn store(&self) -> &Arc<S> { &self.store }

    /// All entries newest-first.
    #[instrument(skip(self), fields(backend = self.store.backend()))]
    pub async fn list(&self) -> Result<Vec<Entry>, ServiceError> {
        self.store.list().await.map_err(|e| {
            error!(error = %e, "guestbook_list_failed");
            ServiceError::from(e)
        })
    }

    /// Trim and validate a submission, stamp it with today's date and persist it.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::guestbook::{service::GuestbookService, store::mock::MockEntryStore};
    /// let svc = GuestbookService::new(Arc::new(MockEntryStore::default()));
    /// let entry = tokio_test::block_on(svc.submit("  Asha ", "Congrats!")).unwrap();
    /// assert_eq!(entry.name, "Asha");
    /// assert!(!entry.date.is_empty());
    /// ```
    #[instrument(skip(self, name, message), fields(backend = self.store.backend()))]
    pub async fn submit(&self, name: &str, message: &str) -> Result<Entry, ServiceError> {
        let name = name.trim();
        let message = message.trim();
        if name.is_empty() {
            return Err(ServiceError::required("name"));
        }
        if message.is_empty() {
            return Err(ServiceError::required("message"));
        }

        let date = (self.clock)();
        let entry = self.store.append(name, message, &date).await.map_err(|e| {
            error!(error = %e, "guestbook_append_failed");
            ServiceError::from(e)
        })?;
        info!(id = entry.id, name = %entry.name, "guestbook_entry_created");
        Ok(entry)
    }
}

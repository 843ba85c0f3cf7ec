use sea_orm::DatabaseConnection;
use tracing::debug;

use models::{errors::ModelError, message as messages};
use crate::guestbook::domain::Entry;
use crate::guestbook::store::{require_non_empty, EntryStore, StoreError};

impl From<ModelError> for StoreError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => StoreError::InvalidArgument(msg),
            ModelError::Db(msg) => StoreError::Unavailable(msg),
        }
    }
}

/// SeaORM-backed entry store over the `messages` table.
///
/// Each call is one autocommit statement; the database's auto-increment key
/// supplies ids. The connection handle is shared and cheap to clone.
#[derive(Clone)]
pub struct SeaOrmEntryStore {
    pub db: DatabaseConnection,
}

impl SeaOrmEntryStore {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait::async_trait]
impl EntryStore for SeaOrmEntryStore {
    async fn list(&self) -> Result<Vec<Entry>, StoreError> {
        let rows = messages::list_newest_first(&self.db).await?;
        Ok(rows.into_iter().map(Entry::from).collect())
    }

    async fn append(&self, name: &str, message: &str, date: &str) -> Result<Entry, StoreError> {
        require_non_empty(name, message)?;
        let row = messages::create(&self.db, name, message, date).await?;
        debug!(id = row.id, "guestbook row inserted");
        Ok(row.into())
    }

    fn backend(&self) -> &'static str { "database" }
}

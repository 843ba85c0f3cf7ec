use std::{path::PathBuf, sync::Arc};

use tracing::{debug, warn};

use crate::guestbook::domain::Entry;
use crate::guestbook::store::{require_non_empty, EntryStore, StoreError};
use crate::storage::json_list_file::{FileError, JsonListFile};

impl From<FileError> for StoreError {
    fn from(e: FileError) -> Self { StoreError::Unavailable(e.to_string()) }
}

/// Guestbook entries kept as one JSON array file, newest first.
/// Ids are `max(existing) + 1`, assigned while the file guard is held.
pub struct JsonFileEntryStore {
    file: JsonListFile<Entry>,
}

impl JsonFileEntryStore {
    /// Bind the store to a file path. The file is created on first append.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, StoreError> {
        let file = JsonListFile::new(path).await?;
        Ok(Arc::new(Self { file }))
    }

    /// All entries sorted by descending id, whatever order the file holds them in.
    pub async fn list(&self) -> Result<Vec<Entry>, StoreError> {
        let mut entries = match self.file.read_all().await {
            Ok(entries) => entries,
            Err(FileError::Malformed { path, source }) => {
                warn!(path = %path.display(), error = %source, "guestbook file unreadable; treating as empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };
        sort_newest_first(&mut entries);
        Ok(entries)
    }

    /// Assign the next id and rewrite the file. Returns once the rename is durable.
    pub async fn append(&self, name: &str, message: &str, date: &str) -> Result<Entry, StoreError> {
        require_non_empty(name, message)?;
        let entry = self
            .file
            .update(|entries| {
                let id = entries
                    .iter()
                    .map(|e| e.id)
                    .max()
                    .unwrap_or(0)
                    .checked_add(1)
                    .ok_or_else(|| StoreError::Unavailable("entry id space exhausted".into()))?;
                let entry = Entry { id, name: name.to_string(), message: message.to_string(), date: date.to_string() };
                entries.push(entry.clone());
                sort_newest_first(entries);
                Ok::<_, StoreError>(entry)
            })
            .await?;
        debug!(id = entry.id, path = %self.file.path().display(), "guestbook entry written");
        Ok(entry)
    }
}

fn sort_newest_first(entries: &mut [Entry]) {
    entries.sort_unstable_by(|a, b| b.id.cmp(&a.id));
}

#[async_trait::async_trait]
impl EntryStore for JsonFileEntryStore {
    async fn list(&self) -> Result<Vec<Entry>, StoreError> { self.list().await }
    async fn append(&self, name: &str, message: &str, date: &str) -> Result<Entry, StoreError> { self.append(name, message, date).await }
    fn backend(&self) -> &'static str { "file" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn tmp_path() -> PathBuf {
        std::env::temp_dir().join(format!("svc_guestbook_{}.json", Uuid::new_v4()))
    }

    #[tokio::test]
    async fn empty_store_lists_nothing() -> Result<(), anyhow::Error> {
        let tmp = tmp_path();
        let store = JsonFileEntryStore::new(&tmp).await?;
        assert!(store.list().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn append_then_list_newest_first_and_persists() -> Result<(), anyhow::Error> {
        let tmp = tmp_path();
        let store = JsonFileEntryStore::new(&tmp).await?;

        let asha = store.append("Asha", "Congrats!", "Mar 5, 2026").await?;
        let ravi = store.append("Ravi", "So happy for you", "Mar 5, 2026").await?;
        assert!(ravi.id > asha.id);

        let list = store.list().await?;
        assert_eq!(list, vec![ravi.clone(), asha.clone()]);

        // reload store from disk to ensure persistence
        let reopened = JsonFileEntryStore::new(&tmp).await?;
        assert_eq!(reopened.list().await?, vec![ravi.clone(), asha]);
        let next = reopened.append("Ravi", "So happy for you", "Mar 6, 2026").await?;
        assert!(next.id > ravi.id);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn list_resorts_hand_edited_file() -> Result<(), anyhow::Error> {
        let tmp = tmp_path();
        tokio::fs::write(
            &tmp,
            serde_json::to_vec(&serde_json::json!([
                {"id": 1, "name": "a", "message": "m1", "date": "Jan 1, 2026"},
                {"id": 3, "name": "c", "message": "m3", "date": "Jan 3, 2026"},
                {"id": 2, "name": "b", "message": "m2", "date": "Jan 2, 2026"}
            ]))?,
        )
        .await?;
        let store = JsonFileEntryStore::new(&tmp).await?;
        let ids: Vec<i64> = store.list().await?.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
        assert_eq!(store.append("d", "m4", "Jan 4, 2026").await?.id, 4);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn empty_arguments_rejected_and_nothing_written() -> Result<(), anyhow::Error> {
        let tmp = tmp_path();
        let store = JsonFileEntryStore::new(&tmp).await?;
        assert!(matches!(store.append("", "hello", "d").await, Err(StoreError::InvalidArgument(_))));
        assert!(matches!(store.append("hi", "", "d").await, Err(StoreError::InvalidArgument(_))));
        assert!(tokio::fs::metadata(&tmp).await.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn malformed_file_lists_empty_but_is_not_overwritten() -> Result<(), anyhow::Error> {
        let tmp = tmp_path();
        tokio::fs::write(&tmp, b"[{\"id\": 1,").await?;
        let store = JsonFileEntryStore::new(&tmp).await?;

        assert!(store.list().await?.is_empty());
        assert!(matches!(store.append("Asha", "hi", "d").await, Err(StoreError::Unavailable(_))));
        assert_eq!(tokio::fs::read(&tmp).await?, b"[{\"id\": 1,");

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn exhausted_id_space_is_unavailable_and_file_kept() -> Result<(), anyhow::Error> {
        let tmp = tmp_path();
        let original = serde_json::to_vec(&serde_json::json!([
            {"id": i64::MAX, "name": "z", "message": "last", "date": "Jan 1, 2026"}
        ]))?;
        tokio::fs::write(&tmp, &original).await?;
        let store = JsonFileEntryStore::new(&tmp).await?;

        assert!(matches!(store.append("Asha", "hi", "d").await, Err(StoreError::Unavailable(_))));
        assert_eq!(tokio::fs::read(&tmp).await?, original);
        assert_eq!(store.list().await?.len(), 1);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn unreadable_location_is_unavailable() -> Result<(), anyhow::Error> {
        // A directory where the file should be cannot be read or replaced.
        let tmp = tmp_path();
        tokio::fs::create_dir_all(&tmp).await?;
        let store = JsonFileEntryStore::new(&tmp).await?;
        assert!(matches!(store.list().await, Err(StoreError::Unavailable(_))));
        assert!(matches!(store.append("Asha", "hi", "d").await, Err(StoreError::Unavailable(_))));

        let _ = tokio::fs::remove_dir_all(&tmp).await;
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_appends_lose_nothing() -> Result<(), anyhow::Error> {
        let tmp = tmp_path();
        let store = JsonFileEntryStore::new(&tmp).await?;

        let mut handles = Vec::new();
        for i in 0..24 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.append(&format!("guest{i}"), "hello", "Mar 5, 2026").await
            }));
        }
        let mut ids = Vec::new();
        for h in handles {
            ids.push(h.await??.id);
        }
        ids.sort_unstable();
        assert_eq!(ids, (1..=24).collect::<Vec<i64>>());
        assert_eq!(store.list().await?.len(), 24);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }
}

use std::{
    io,
    marker::PhantomData,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tokio::{fs, io::AsyncWriteExt, sync::Mutex};

#[derive(Debug, Error)]
pub enum FileError {
    #[error("io error on {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("malformed json in {path}: {source}")]
    Malformed { path: PathBuf, source: serde_json::Error },
}

/// A JSON array persisted as a single file.
///
/// Every update is read-modify-write of the whole file under one exclusive
/// guard. Writes land in a sibling temp file that is fsynced and renamed over
/// the target, so readers see either the old or the new array, never a mix.
pub struct JsonListFile<T> {
    file_path: PathBuf,
    write_guard: Mutex<()>,
    _items: PhantomData<fn() -> T>,
}

impl<T> JsonListFile<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Bind to a path, creating the parent directory. The file itself is created on first write.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Self, FileError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|source| FileError::Io { path: parent.to_path_buf(), source })?;
        }
        Ok(Self { file_path, write_guard: Mutex::new(()), _items: PhantomData })
    }

    pub fn path(&self) -> &Path { &self.file_path }

    /// Current contents. A missing or zero-length file reads as empty.
    pub async fn read_all(&self) -> Result<Vec<T>, FileError> {
        let bytes = match fs::read(&self.file_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(FileError::Io { path: self.file_path.clone(), source }),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        serde_json::from_slice(&bytes).map_err(|source| FileError::Malformed { path: self.file_path.clone(), source })
    }

    /// Apply `f` to the current contents and persist the result before returning.
    /// Nothing is written when `f` fails.
    pub async fn update<F, R, E>(&self, f: F) -> Result<R, E>
    where
        F: FnOnce(&mut Vec<T>) -> Result<R, E>,
        E: From<FileError>,
    {
        let _guard = self.write_guard.lock().await;
        let mut items = self.read_all().await?;
        let out = f(&mut items)?;
        self.write_atomic(&items).await?;
        Ok(out)
    }

    async fn write_atomic(&self, items: &[T]) -> Result<(), FileError> {
        let io_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source| FileError::Io { path, source }
        };
        let data = serde_json::to_vec_pretty(items)
            .map_err(|source| FileError::Malformed { path: self.file_path.clone(), source })?;

        let tmp = self.temp_path();
        let mut file = fs::File::create(&tmp).await.map_err(io_err(&tmp))?;
        file.write_all(&data).await.map_err(io_err(&tmp))?;
        file.flush().await.map_err(io_err(&tmp))?;
        file.sync_all().await.map_err(io_err(&tmp))?;
        drop(file);

        fs::rename(&tmp, &self.file_path).await.map_err(io_err(&self.file_path))?;
        // Persist the rename itself; not supported on every platform.
        if let Some(parent) = self.file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Ok(dir) = fs::File::open(parent).await {
                let _ = dir.sync_all().await;
            }
        }
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.file_path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.file_path.with_file_name(name)
    }
}

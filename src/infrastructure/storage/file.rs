use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::warn;

use crate::core::errors::ApiError;
use crate::infrastructure::storage::SessionStore;

/// Durable store: a JSON object in a single file, surviving process restarts.
/// Concurrent processes sharing the file race last-write-wins; there is no
/// cross-process coordination.
#[derive(Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read_entries(&self) -> Result<HashMap<String, String>, ApiError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(entries) => Ok(entries),
                Err(err) => {
                    // An unreadable file (e.g. an interrupted write) counts as
                    // empty so the next write or remove overwrites the damage;
                    // a hard error here would make clearing impossible.
                    warn!("discarding unreadable session file: {err}");
                    Ok(HashMap::new())
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(err) => Err(ApiError::Storage(err.to_string())),
        }
    }

    async fn write_entries(&self, entries: &HashMap<String, String>) -> Result<(), ApiError> {
        let path = self.path.clone();
        let content =
            serde_json::to_string_pretty(entries).map_err(|e| ApiError::Storage(e.to_string()))?;

        // Blocking IO so the permission bits land atomically with the write.
        tokio::task::spawn_blocking(move || write_owner_only(&path, &content))
            .await
            .map_err(|e| ApiError::Storage(format!("session write task panicked: {e}")))?
            .map_err(|e| ApiError::Storage(e.to_string()))
    }
}

/// Write the file readable by the owner only (0o600 on unix); the blob holds
/// live credentials.
fn write_owner_only(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    #[cfg(unix)]
    {
        use std::fs::Permissions;
        use std::io::Write;
        use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)?;
        file.write_all(content.as_bytes())?;
        // `mode` only applies on creation; a pre-existing file keeps whatever
        // permissions it had, so tighten them on every write.
        std::fs::set_permissions(path, Permissions::from_mode(0o600))?;
    }

    #[cfg(not(unix))]
    {
        std::fs::write(path, content)?;
    }

    Ok(())
}

#[async_trait]
impl SessionStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, ApiError> {
        let entries = self.read_entries().await?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), ApiError> {
        let mut entries = self.read_entries().await?;
        entries.insert(key.to_string(), value);
        self.write_entries(&entries).await
    }

    async fn remove(&self, key: &str) -> Result<(), ApiError> {
        if !tokio::fs::try_exists(&self.path).await.unwrap_or(false) {
            return Ok(());
        }
        // Rewrite even when the key was absent: if the file held damaged
        // content the rewrite replaces it with a clean map.
        let mut entries = self.read_entries().await?;
        entries.remove(key);
        self.write_entries(&entries).await
    }
}

//! Item repository persisted as a JSON array on disk

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{ItemRepository, RepositoryError};
use crate::item::{Item, ItemId, ItemPayload};

/// Stores all items in a single pretty-printed JSON file
///
/// A missing file lists as empty and is created on the first write.
/// Writes are serialized so concurrent updates never interleave a
/// read-modify-write cycle.
#[derive(Debug)]
pub struct JsonFileRepository {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_items(&self) -> Result<Vec<Item>, RepositoryError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("Item store {} does not exist yet", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(RepositoryError::Transport(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content).map_err(|e| {
            RepositoryError::Transport(format!("Failed to parse {}: {}", self.path.display(), e))
        })
    }

    async fn write_items(&self, items: &[Item]) -> Result<(), RepositoryError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    RepositoryError::Transport(format!(
                        "Failed to create {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let content = serde_json::to_string_pretty(items)
            .map_err(|e| RepositoryError::Transport(format!("Failed to serialize items: {}", e)))?;

        tokio::fs::write(&self.path, content).await.map_err(|e| {
            RepositoryError::Transport(format!("Failed to write {}: {}", self.path.display(), e))
        })
    }
}

#[async_trait]
impl ItemRepository for JsonFileRepository {
    async fn list_items(&self) -> Result<Vec<Item>, RepositoryError> {
        self.read_items().await
    }

    async fn create_item(&self, payload: &ItemPayload) -> Result<Item, RepositoryError> {
        let _guard = self.write_lock.lock().await;
        let mut items = self.read_items().await?;
        let id = items.iter().map(|i| i.id).max().unwrap_or(0) + 1;
        let item = payload.clone().with_id(id);
        items.push(item.clone());
        self.write_items(&items).await?;
        tracing::debug!("Created item {} ({}) in {}", id, item.name, self.path.display());
        Ok(item)
    }

    async fn update_item(&self, id: ItemId, payload: &ItemPayload) -> Result<(), RepositoryError> {
        let _guard = self.write_lock.lock().await;
        let mut items = self.read_items().await?;
        let slot = items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(RepositoryError::NotFound(id))?;
        *slot = payload.clone().with_id(id);
        self.write_items(&items).await?;
        tracing::debug!("Updated item {} in {}", id, self.path.display());
        Ok(())
    }
}

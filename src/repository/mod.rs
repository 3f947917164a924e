//! Item repository collaborator
//!
//! The grid only needs three capabilities from its backend: list every item
//! in server order, create one item, and update one item by identity. How the
//! calls are transported or authenticated is up to the implementation.
//!
//! Two implementations ship with the crate:
//! - [`InMemoryRepository`] - instrumented store used by tests and benches
//! - [`JsonFileRepository`] - file-backed store used by the command line tool

mod json_file;
mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::item::{Item, ItemId, ItemPayload};

pub use json_file::JsonFileRepository;
pub use memory::{InMemoryRepository, RepositoryCall, RepositoryEvent};

/// Fallback shown when a failure carries no usable message
pub const GENERIC_SAVE_FAILURE: &str = "Failed to save changes. Please try again.";

/// Failures reported by an item repository
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// The call never produced a backend answer (connection, I/O, decoding)
    #[error("transport error: {0}")]
    Transport(String),
    /// The targeted item does not exist on the backend
    #[error("item {0} not found")]
    NotFound(ItemId),
    /// The backend refused the call and explained why
    #[error("{0}")]
    Rejected(String),
}

impl RepositoryError {
    /// Message suitable for the grid's error banner
    ///
    /// Prefers the backend's own message, falls back to a generic string.
    pub fn user_message(&self) -> String {
        match self {
            RepositoryError::Rejected(msg) | RepositoryError::Transport(msg)
                if !msg.trim().is_empty() =>
            {
                msg.clone()
            }
            RepositoryError::NotFound(id) => format!("Item {} was not found", id),
            _ => GENERIC_SAVE_FAILURE.to_string(),
        }
    }
}

/// Backend capability consumed by the grid
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// All items, in the backend's canonical order
    async fn list_items(&self) -> Result<Vec<Item>, RepositoryError>;

    /// Create an item, returning it with its assigned identity
    async fn create_item(&self, payload: &ItemPayload) -> Result<Item, RepositoryError>;

    /// Replace the fields of an existing item
    async fn update_item(&self, id: ItemId, payload: &ItemPayload) -> Result<(), RepositoryError>;
}

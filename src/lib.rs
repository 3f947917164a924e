//! itemgrid - Elm-style spreadsheet editor for menu items
//!
//! This crate provides the grid engine (cell validation, single-cell editing,
//! keyboard navigation, save reconciliation) plus a headless session that
//! drives it against an item repository.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod grid;
pub mod item;
pub mod keymap;
pub mod messages;
pub mod model;
pub mod repository;
pub mod runtime;
pub mod script;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::GridConfig;
pub use grid::{GridState, GridViewport};
pub use item::{Item, ItemId, ItemPayload};
pub use messages::Msg;
pub use model::AppModel;
pub use repository::{ItemRepository, RepositoryError};
pub use runtime::Session;

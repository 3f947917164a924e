//! Editable items grid
//!
//! A spreadsheet-like editor for menu items with:
//! - Committed rows mirroring the backend plus one trailing placeholder row
//! - Per-cell dirty/invalid flags computed against the last loaded baseline
//! - Single-cell editing with commit/cancel
//! - Keyboard navigation (arrows, Home/End, Tab wrapping, Enter/F2/Escape)
//! - Save reconciliation: ordered creates, concurrent updates, full reload
//!
//! # Architecture
//!
//! ```text
//! GridState
//! ├── GridModel (rows, baseline, backing ids)
//! ├── focused: Option<CellPosition>
//! ├── editing: Option<CellEditState>
//! └── save: SaveStatus
//! ```
//!
//! Focus rendering is delegated to a [`FocusHost`] supplied by the caller;
//! [`GridViewport`] is the headless implementation.

mod editor;
mod focus;
mod model;
pub mod navigation;
pub mod reconcile;
pub mod render;
mod state;
pub mod validation;
mod viewport;

pub use editor::{CellEditState, EditBuffer};
pub use focus::FocusHost;
pub use model::{Cell, CellPosition, GridModel, Row};
pub use navigation::KeyOutcome;
pub use reconcile::{SaveError, SavePlan};
pub use state::{GridState, SaveStatus};
pub use validation::{is_valid_cell, Column, COLUMN_COUNT};
pub use viewport::GridViewport;

//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use crate::grid::SaveError;
use crate::item::Item;
use crate::keymap::Keystroke;
use crate::repository::RepositoryError;

/// Input aimed at the items grid
#[derive(Debug, Clone, PartialEq)]
pub enum GridMsg {
    /// Key-down on the grid that no keybinding claimed
    Key(Keystroke),
    /// Text typed or pasted into the open cell
    InsertText(String),
    /// Pointer activation of a cell
    Click { row: usize, col: usize },
    /// The open cell lost focus (commit without refocus)
    Blur,
    /// Revert one row to its last saved values
    UndoRow(usize),
    /// Revert the focused row
    UndoFocusedRow,
    /// Drop all edits and unsaved rows
    DiscardAll,
    /// Persist everything
    Save,
}

/// Application lifecycle and async completions
#[derive(Debug, Clone, PartialEq)]
pub enum AppMsg {
    /// Fetch the item list (initial load or refresh)
    Load,
    /// A list request finished
    ItemsLoaded {
        generation: u64,
        result: Result<Vec<Item>, RepositoryError>,
    },
    /// A save finished; `Ok` carries the reloaded listing
    SaveCompleted(Result<Vec<Item>, SaveError>),
    Quit,
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    Grid(GridMsg),
    App(AppMsg),
}

//! Command enum representing the grid actions that can be bound to keys
//!
//! Commands are the bridge between keybindings and the message system.
//! Each command maps to zero or more `Msg` values for the update loop.

use crate::messages::{AppMsg, GridMsg, Msg};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Persist pending edits and new rows
    Save,
    /// Drop all edits and unsaved rows
    DiscardChanges,
    /// Revert the focused row to its last saved values
    UndoRow,
    Quit,
    /// Removes a default binding when used in a user keymap
    Unbound,
}

impl Command {
    pub fn to_msgs(self) -> Vec<Msg> {
        match self {
            Command::Save => vec![Msg::Grid(GridMsg::Save)],
            Command::DiscardChanges => vec![Msg::Grid(GridMsg::DiscardAll)],
            Command::UndoRow => vec![Msg::Grid(GridMsg::UndoFocusedRow)],
            Command::Quit => vec![Msg::App(AppMsg::Quit)],
            Command::Unbound => vec![],
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Command::Save => "Save Changes",
            Command::DiscardChanges => "Discard Changes",
            Command::UndoRow => "Undo Row",
            Command::Quit => "Quit",
            Command::Unbound => "Unbound",
        }
    }
}

//! Grid component state and the cell editor state machine
//!
//! The grid is always either viewing (no cell open) or editing exactly one
//! cell. Opening a cell on the placeholder row first materializes a new row.

use super::editor::{CellEditState, EditBuffer};
use super::focus::FocusHost;
use super::model::{CellPosition, GridModel};
use super::validation::{strip_price_prefix, Column, COLUMN_COUNT};
use crate::item::Item;

/// Save progress and the last visible error
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveStatus {
    /// A save is in flight; further saves are refused
    pub is_saving: bool,
    /// Message from the last failed save, cleared when a new save starts
    pub error: Option<String>,
}

/// Everything the items grid owns
#[derive(Debug, Clone, Default)]
pub struct GridState {
    pub model: GridModel,
    /// Keyboard focus, independent of editing
    pub focused: Option<CellPosition>,
    /// Cell editing state (Some when editing a cell)
    pub editing: Option<CellEditState>,
    pub save: SaveStatus,
    /// Message from the last failed load
    pub load_error: Option<String>,
}

impl GridState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: &[Item]) -> Self {
        Self {
            model: GridModel::from_items(items),
            ..Self::default()
        }
    }

    /// Check if currently editing a cell
    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn editing_position(&self) -> Option<CellPosition> {
        self.editing.as_ref().map(|e| e.position)
    }

    /// Live buffer of the open cell
    pub fn edit_buffer_mut(&mut self) -> Option<&mut EditBuffer> {
        self.editing.as_mut().map(|e| &mut e.buffer)
    }

    /// Move focus to a cell, clamped to the grid, and bring it into view
    ///
    /// Returns the focused position, or `None` for a grid without rows.
    pub fn focus_cell(
        &mut self,
        row: usize,
        col: usize,
        host: &mut dyn FocusHost,
    ) -> Option<CellPosition> {
        if self.model.is_empty() {
            return None;
        }
        let pos = CellPosition::new(
            row.min(self.model.row_count() - 1),
            col.min(COLUMN_COUNT - 1),
        );
        host.focus(pos);
        host.scroll_into_view(pos);
        self.focused = Some(pos);
        Some(pos)
    }

    /// Open a cell for editing (click or keyboard activation)
    ///
    /// Any other open cell is committed first. Activating the placeholder row
    /// turns it into a new empty row and opens the activated cell with an empty
    /// buffer; otherwise the buffer starts with the cell's value (price without
    /// its `$`).
    pub fn activate_cell(&mut self, pos: CellPosition, host: &mut dyn FocusHost) -> bool {
        if pos.row >= self.model.row_count() || pos.col >= COLUMN_COUNT {
            tracing::debug!("Ignoring activation outside the grid at {:?}", pos);
            return false;
        }

        if let Some(current) = self.editing_position() {
            if current == pos {
                return true;
            }
            self.commit_edit(false, host);
        }

        self.focused = Some(pos);
        host.focus(pos);
        host.scroll_into_view(pos);

        let value = if self.model.is_placeholder_row(pos.row) {
            self.model.begin_new_row(pos.row);
            String::new()
        } else {
            let value = self.model.value(pos);
            match Column::from_index(pos.col) {
                Some(Column::Price) => strip_price_prefix(value).to_string(),
                _ => value.to_string(),
            }
        };

        tracing::debug!("Editing cell ({}, {})", pos.row, pos.col);
        self.editing = Some(CellEditState::new(pos, &value));
        true
    }

    /// Commit the open cell's buffer into the model
    ///
    /// Always revalidates and re-marks dirtiness, even for an unchanged
    /// buffer. `refocus` is off when navigation is about to move focus.
    pub fn commit_edit(
        &mut self,
        refocus: bool,
        host: &mut dyn FocusHost,
    ) -> Option<CellPosition> {
        let edit = self.editing.take()?;
        let pos = edit.position;
        let valid = self.model.commit_cell(pos.row, pos.col, edit.text());
        tracing::debug!(
            "Committed cell ({}, {}) valid={:?} modified={}",
            pos.row,
            pos.col,
            valid,
            edit.is_modified()
        );
        if refocus {
            self.focus_cell(pos.row, pos.col, host);
        }
        Some(pos)
    }

    /// Close the open cell without touching the model
    pub fn cancel_edit(&mut self, host: &mut dyn FocusHost) -> Option<CellPosition> {
        let edit = self.editing.take()?;
        let pos = edit.position;
        tracing::debug!("Cancelled edit of cell ({}, {})", pos.row, pos.col);
        self.focus_cell(pos.row, pos.col, host);
        Some(pos)
    }

    /// Revert one row to its baseline, committing any open cell first
    pub fn undo_row(&mut self, row: usize, host: &mut dyn FocusHost) -> bool {
        self.commit_edit(false, host);
        self.model.undo_row(row)
    }

    /// Drop all edits and new rows
    pub fn discard_all(&mut self) {
        self.editing = None;
        self.model.discard_all();
        self.save.error = None;
        self.clamp_focus();
    }

    /// Replace all rows with a fresh server listing
    pub fn apply_items(&mut self, items: &[Item]) {
        self.editing = None;
        self.model.load(items);
        self.clamp_focus();
    }

    /// Keep focus inside the grid after rows were removed
    pub fn clamp_focus(&mut self) {
        if self.model.is_empty() {
            self.focused = None;
            return;
        }
        let max_row = self.model.row_count() - 1;
        if let Some(pos) = self.focused.as_mut() {
            pos.row = pos.row.min(max_row);
        }
    }
}

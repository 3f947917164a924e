//! Keyboard navigation for the items grid
//!
//! Arrow keys clamp to the grid edges, Tab and Shift+Tab wrap across rows
//! and let focus leave the grid at its absolute first and last cells. While
//! a cell is open, plain arrows belong to the text field; Ctrl or Meta turns
//! them back into grid moves after committing the edit.

use super::focus::FocusHost;
use super::model::CellPosition;
use super::state::GridState;
use super::validation::COLUMN_COUNT;
use crate::keymap::{KeyCode, Keystroke};

/// What the grid did with a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Consumed; default handling is suppressed
    Handled,
    /// Not a navigation key in the current state; the open cell may use it
    Ignored,
    /// Let the host handle it natively (Tab leaving the grid)
    Propagate,
}

/// Direction for grid moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn from_key(key: KeyCode) -> Option<Self> {
        match key {
            KeyCode::Up => Some(Direction::Up),
            KeyCode::Down => Some(Direction::Down),
            KeyCode::Left => Some(Direction::Left),
            KeyCode::Right => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Keys that snap focus into an unfocused grid
fn is_entry_key(key: KeyCode) -> bool {
    key.is_arrow()
        || matches!(
            key,
            KeyCode::Home | KeyCode::End | KeyCode::Enter | KeyCode::F(2) | KeyCode::Tab
        )
}

/// Route one key-down event on the grid
pub fn handle_key(state: &mut GridState, keystroke: Keystroke, host: &mut dyn FocusHost) -> KeyOutcome {
    let key = keystroke.key;
    let shift = keystroke.mods.shift();

    // Enter and Escape inside the open cell
    if state.is_editing() {
        match key {
            KeyCode::Enter => {
                state.commit_edit(true, host);
                return KeyOutcome::Handled;
            }
            KeyCode::Escape => {
                state.cancel_edit(host);
                return KeyOutcome::Handled;
            }
            _ => {}
        }
    }

    let Some(focused) = state.focused else {
        if !is_entry_key(key) || state.model.is_empty() {
            return KeyOutcome::Ignored;
        }
        let (row, col) = if shift {
            (state.model.row_count() - 1, COLUMN_COUNT - 1)
        } else {
            (0, 0)
        };
        tracing::debug!("Focus entered grid at ({}, {})", row, col);
        state.focus_cell(row, col, host);
        return KeyOutcome::Handled;
    };

    let editing = state.is_editing();
    let nav_while_editing = editing && keystroke.mods.ctrl_or_meta();
    let may_move = !editing || nav_while_editing;

    match key {
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right if may_move => {
            if nav_while_editing {
                state.commit_edit(false, host);
            }
            if let Some(direction) = Direction::from_key(key) {
                move_focus(state, focused, direction, host);
            }
            KeyOutcome::Handled
        }
        KeyCode::Home | KeyCode::End if may_move => {
            if nav_while_editing {
                state.commit_edit(false, host);
            }
            let col = if key == KeyCode::Home { 0 } else { COLUMN_COUNT - 1 };
            state.focus_cell(focused.row, col, host);
            KeyOutcome::Handled
        }
        KeyCode::Tab => tab(state, focused, shift, host),
        KeyCode::Enter | KeyCode::F(2) if !editing => {
            state.activate_cell(focused, host);
            KeyOutcome::Handled
        }
        _ => KeyOutcome::Ignored,
    }
}

/// Move one cell, clamped at the grid edges
fn move_focus(
    state: &mut GridState,
    from: CellPosition,
    direction: Direction,
    host: &mut dyn FocusHost,
) {
    let (row, col) = match direction {
        Direction::Up => (from.row.saturating_sub(1), from.col),
        Direction::Down => (from.row + 1, from.col),
        Direction::Left => (from.row, from.col.saturating_sub(1)),
        Direction::Right => (from.row, from.col + 1),
    };
    state.focus_cell(row, col, host);
}

fn tab(
    state: &mut GridState,
    focused: CellPosition,
    backward: bool,
    host: &mut dyn FocusHost,
) -> KeyOutcome {
    if state.model.is_empty() {
        return KeyOutcome::Ignored;
    }
    let max_row = state.model.row_count() - 1;
    let max_col = COLUMN_COUNT - 1;
    let at_start = focused.row == 0 && focused.col == 0;
    let at_end = focused.row == max_row && focused.col == max_col;

    state.commit_edit(false, host);

    if (backward && at_start) || (!backward && at_end) {
        tracing::debug!("Tab leaving grid from ({}, {})", focused.row, focused.col);
        host.leave_grid(backward);
        return KeyOutcome::Propagate;
    }

    let (row, col) = if backward {
        if focused.col > 0 {
            (focused.row, focused.col - 1)
        } else {
            (focused.row - 1, max_col)
        }
    } else if focused.col < max_col {
        (focused.row, focused.col + 1)
    } else {
        (focused.row + 1, 0)
    };
    state.focus_cell(row, col, host);
    KeyOutcome::Handled
}

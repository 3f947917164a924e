//! Grid message handlers

use crate::commands::Cmd;
use crate::grid::navigation::{self, KeyOutcome};
use crate::grid::reconcile::plan_save;
use crate::grid::{CellPosition, FocusHost};
use crate::keymap::{KeyCode, Keystroke};
use crate::messages::GridMsg;
use crate::model::AppModel;

/// Handle grid messages
pub fn update_grid(model: &mut AppModel, msg: GridMsg, host: &mut dyn FocusHost) -> Option<Cmd> {
    let grid = &mut model.grid;

    match msg {
        GridMsg::Key(keystroke) => match navigation::handle_key(grid, keystroke, host) {
            KeyOutcome::Handled | KeyOutcome::Propagate => Some(Cmd::Redraw),
            KeyOutcome::Ignored => edit_key(model, keystroke),
        },

        GridMsg::InsertText(text) => match grid.edit_buffer_mut() {
            Some(buffer) => {
                buffer.insert_text(&text);
                Some(Cmd::Redraw)
            }
            None => {
                tracing::debug!("Ignoring text input with no open cell");
                None
            }
        },

        GridMsg::Click { row, col } => grid
            .activate_cell(CellPosition::new(row, col), host)
            .then_some(Cmd::Redraw),

        GridMsg::Blur => grid.commit_edit(false, host).map(|_| Cmd::Redraw),

        GridMsg::UndoRow(row) => {
            if !grid.undo_row(row, host) {
                tracing::debug!("Row {} has no saved values to restore", row);
            }
            Some(Cmd::Redraw)
        }

        GridMsg::UndoFocusedRow => {
            let row = grid.focused?.row;
            update_grid(model, GridMsg::UndoRow(row), host)
        }

        GridMsg::DiscardAll => {
            if grid.save.is_saving || !grid.model.can_discard() {
                tracing::debug!(
                    "Ignoring discard (saving={}, changes={})",
                    grid.save.is_saving,
                    grid.model.can_discard()
                );
                return None;
            }
            grid.discard_all();
            Some(Cmd::Redraw)
        }

        GridMsg::Save => {
            if grid.save.is_saving {
                tracing::debug!("Save already in progress, ignoring");
                return None;
            }

            grid.commit_edit(false, host);
            grid.save.error = None;

            match plan_save(&grid.model) {
                Ok(plan) => {
                    grid.save.is_saving = true;
                    Some(Cmd::batch(vec![Cmd::SaveItems(plan), Cmd::Redraw]))
                }
                Err(err) => {
                    tracing::warn!("Save aborted: {}", err);
                    grid.save.error = Some(err.user_message());
                    Some(Cmd::Redraw)
                }
            }
        }
    }
}

/// Keys the navigation controller left alone go to the open cell
fn edit_key(model: &mut AppModel, keystroke: Keystroke) -> Option<Cmd> {
    let buffer = model.grid.edit_buffer_mut()?;

    match keystroke.key {
        KeyCode::Backspace => buffer.delete_backward(),
        KeyCode::Delete => buffer.delete_forward(),
        KeyCode::Left => buffer.move_left(),
        KeyCode::Right => buffer.move_right(),
        KeyCode::Home => buffer.move_home(),
        KeyCode::End => buffer.move_end(),
        _ => match keystroke.typed_char() {
            Some(ch) => buffer.insert_char(ch),
            None => return None,
        },
    }
    Some(Cmd::Redraw)
}

//! Grid viewport
//!
//! Tracks which rows of the grid are visible and serves as the headless
//! [`FocusHost`]: focusing a cell records it, scrolling brings its row into view.

use super::focus::FocusHost;
use super::model::CellPosition;

/// Viewport state for the items grid
#[derive(Debug, Clone, Default)]
pub struct GridViewport {
    /// First visible row (0-indexed)
    pub top_row: usize,
    /// Number of rows that fit in the viewport
    pub visible_rows: usize,
    /// Cell that last received focus from the grid
    pub focused: Option<CellPosition>,
    /// Set when focus left the grid by Tab
    pub left_grid: bool,
}

impl GridViewport {
    pub fn new(visible_rows: usize) -> Self {
        Self {
            visible_rows,
            ..Self::default()
        }
    }

    /// Ensure a row is visible, scrolling if necessary
    pub fn ensure_visible(&mut self, row: usize) {
        if row < self.top_row {
            self.top_row = row;
        } else if self.visible_rows > 0 && row >= self.top_row + self.visible_rows {
            self.top_row = row + 1 - self.visible_rows;
        }
    }

    /// Check if a row is visible
    pub fn is_row_visible(&self, row: usize) -> bool {
        row >= self.top_row && row < self.top_row + self.visible_rows
    }

    /// Pull `top_row` back after the grid shrank (e.g. after a reload)
    pub fn clamp_to(&mut self, total_rows: usize) {
        let max_top = total_rows.saturating_sub(self.visible_rows);
        self.top_row = self.top_row.min(max_top);
    }
}

impl FocusHost for GridViewport {
    fn focus(&mut self, pos: CellPosition) {
        self.focused = Some(pos);
        self.left_grid = false;
    }

    fn scroll_into_view(&mut self, pos: CellPosition) {
        self.ensure_visible(pos.row);
    }

    fn leave_grid(&mut self, _backward: bool) {
        self.left_grid = true;
    }
}

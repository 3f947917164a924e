//! Grid data model
//!
//! Owns the committed rows, the trailing placeholder row, the baseline used
//! for dirty tracking, and the row-to-backend identity mapping.
//!
//! Invariants (outside of a never-loaded grid, which has no rows at all):
//! - the last row is the placeholder row, and it is the only one
//! - `backing_ids.len() == rows.len() - 1`
//! - `original.len() <= rows.len() - 1`; rows at or past `original.len()`
//!   are new, unsaved rows

use super::validation::{is_valid_cell, normalize, price_to_text, Column, COLUMN_COUNT};
use crate::item::{Item, ItemId};

/// Position of a cell in the grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CellPosition {
    pub row: usize,
    pub col: usize,
}

impl CellPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// One cell's stored text and derived flags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    /// Raw text; price and amount are parsed on demand
    pub value: String,
    /// Value differs from the baseline value of the same cell
    pub is_dirty: bool,
    /// Value fails its column rule
    pub is_invalid: bool,
}

impl Cell {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            is_dirty: false,
            is_invalid: false,
        }
    }

    /// Copy of this cell with both flags cleared
    fn clean(&self) -> Self {
        Self::new(self.value.clone())
    }
}

/// Cells in column order: name, description, price, amount
pub type Row = [Cell; COLUMN_COUNT];

fn placeholder_row() -> Row {
    Column::ALL.map(|col| Cell::new(col.placeholder()))
}

fn empty_row() -> Row {
    std::array::from_fn(|_| Cell::default())
}

fn item_row(item: &Item) -> Row {
    [
        Cell::new(item.name.clone()),
        Cell::new(item.description.clone()),
        Cell::new(price_to_text(item.price)),
        Cell::new(item.amount.to_string()),
    ]
}

/// Authoritative in-memory table
#[derive(Debug, Clone, Default)]
pub struct GridModel {
    rows: Vec<Row>,
    original: Vec<Row>,
    backing_ids: Vec<Option<ItemId>>,
}

impl GridModel {
    /// Create a grid that has not been loaded yet (no rows at all)
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a grid from items, one row per item plus the placeholder
    pub fn from_items(items: &[Item]) -> Self {
        let mut model = Self::new();
        model.load(items);
        model
    }

    /// Replace all state with the given items
    pub fn load(&mut self, items: &[Item]) {
        let rows: Vec<Row> = items.iter().map(item_row).collect();
        self.original = rows.clone();
        self.backing_ids = items.iter().map(|item| Some(item.id)).collect();
        self.rows = rows;
        self.rows.push(placeholder_row());
        tracing::debug!("Loaded grid with {} committed rows", self.original.len());
    }

    /// Number of rows including the placeholder
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        COLUMN_COUNT
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, row: usize) -> Option<&Row> {
        self.rows.get(row)
    }

    pub fn cell(&self, pos: CellPosition) -> Option<&Cell> {
        self.rows.get(pos.row)?.get(pos.col)
    }

    /// Cell value at position, empty for out-of-range positions
    pub fn value(&self, pos: CellPosition) -> &str {
        self.cell(pos).map(|c| c.value.as_str()).unwrap_or("")
    }

    /// Rows excluding the trailing placeholder
    pub fn data_rows(&self) -> &[Row] {
        let end = self.rows.len().saturating_sub(1);
        &self.rows[..end]
    }

    /// Baseline rows from the last load
    pub fn original(&self) -> &[Row] {
        &self.original
    }

    pub fn backing_ids(&self) -> &[Option<ItemId>] {
        &self.backing_ids
    }

    /// Backend identity of a row, `None` for new rows and the placeholder
    pub fn backing_id(&self, row: usize) -> Option<ItemId> {
        self.backing_ids.get(row).copied().flatten()
    }

    /// Last row whose every cell still shows its prompt text
    pub fn is_placeholder_row(&self, row: usize) -> bool {
        if self.rows.is_empty() || row != self.rows.len() - 1 {
            return false;
        }
        self.rows[row]
            .iter()
            .zip(Column::ALL)
            .all(|(cell, col)| cell.value == col.placeholder())
    }

    /// Turn the placeholder row into an empty new row and append a fresh placeholder
    ///
    /// Returns false (and changes nothing) if `row` is not the placeholder row.
    pub fn begin_new_row(&mut self, row: usize) -> bool {
        if !self.is_placeholder_row(row) {
            tracing::warn!("begin_new_row({}) called on a non-placeholder row", row);
            return false;
        }
        self.rows[row] = empty_row();
        self.rows.push(placeholder_row());
        self.backing_ids.push(None);
        tracing::debug!("Started new row {}", row);
        true
    }

    /// Store a value, recomputing the cell's dirty and invalid flags
    ///
    /// Returns whether the value is valid, or `None` if the position is out of
    /// range or targets the placeholder row.
    pub fn commit_cell(&mut self, row: usize, col: usize, raw: &str) -> Option<bool> {
        if col >= COLUMN_COUNT || row >= self.rows.len() {
            return None;
        }
        if self.is_placeholder_row(row) {
            tracing::warn!("Refusing to commit into placeholder row {}", row);
            return None;
        }

        let value = normalize(raw, col);
        let valid = is_valid_cell(&value, col);
        let is_dirty = self
            .original
            .get(row)
            .is_some_and(|baseline| baseline[col].value != value);

        let cell = &mut self.rows[row][col];
        cell.value = value;
        cell.is_dirty = is_dirty;
        cell.is_invalid = !valid;
        Some(valid)
    }

    /// Revert a row to its baseline
    ///
    /// Returns false for rows without a baseline (new rows are discarded, not undone).
    pub fn undo_row(&mut self, row: usize) -> bool {
        let Some(baseline) = self.original.get(row) else {
            return false;
        };
        self.rows[row] = baseline.clone().map(|cell| cell.clean());
        tracing::debug!("Reverted row {} to baseline", row);
        true
    }

    /// Drop every edit and every new row
    pub fn discard_all(&mut self) {
        self.rows = self
            .original
            .iter()
            .map(|row| row.clone().map(|cell| cell.clean()))
            .collect();
        self.rows.push(placeholder_row());
        self.backing_ids.truncate(self.original.len());
        tracing::debug!("Discarded all changes");
    }

    /// Any baseline cell differs from the current value
    pub fn is_row_modified(&self, row: usize) -> bool {
        let (Some(current), Some(baseline)) = (self.rows.get(row), self.original.get(row)) else {
            return false;
        };
        current
            .iter()
            .zip(baseline.iter())
            .any(|(cell, base)| cell.value != base.value)
    }

    /// Is the row past the baseline (added since the last load)?
    pub fn is_new_row(&self, row: usize) -> bool {
        row >= self.original.len() && row + 1 < self.rows.len()
    }

    pub fn has_dirty_changes(&self) -> bool {
        self.rows
            .iter()
            .take(self.original.len())
            .any(|row| row.iter().any(|cell| cell.is_dirty))
    }

    pub fn has_invalid_cells(&self) -> bool {
        self.rows
            .iter()
            .any(|row| row.iter().any(|cell| cell.is_invalid))
    }

    pub fn has_unsaved_rows(&self) -> bool {
        self.rows.len().saturating_sub(1) > self.original.len()
    }

    pub fn can_discard(&self) -> bool {
        self.has_dirty_changes() || self.has_unsaved_rows()
    }

    /// Number of dirty cells on rows with a baseline
    pub fn dirty_cell_count(&self) -> usize {
        self.rows
            .iter()
            .take(self.original.len())
            .map(|row| row.iter().filter(|cell| cell.is_dirty).count())
            .sum()
    }

    pub fn invalid_cell_count(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.iter().filter(|cell| cell.is_invalid).count())
            .sum()
    }

    /// Check structural invariants, returning a description of the first violation
    pub fn check_invariants(&self) -> Result<(), String> {
        if self.rows.is_empty() {
            if !self.backing_ids.is_empty() || !self.original.is_empty() {
                return Err("empty grid with baseline or backing ids".to_string());
            }
            return Ok(());
        }
        let last = self.rows.len() - 1;
        if !self.is_placeholder_row(last) {
            return Err(format!("last row {} is not the placeholder", last));
        }
        if self.backing_ids.len() != last {
            return Err(format!(
                "backing ids {} != data rows {}",
                self.backing_ids.len(),
                last
            ));
        }
        if self.original.len() > last {
            return Err(format!(
                "baseline {} longer than data rows {}",
                self.original.len(),
                last
            ));
        }
        Ok(())
    }
}

//! Plain-text rendering of the items grid
//!
//! Layout:
//!
//! ```text
//!    | Name          | Description   | Price    | Amount
//! ---+---------------+---------------+----------+--------
//!  1 | [Coffee]      | Hot           | $3.00*   | 10
//!  2 | _Add Item..._ | ...
//! status line
//! ```

use super::model::{CellPosition, GridModel};
use super::state::GridState;
use super::validation::{format_price, Column, COLUMN_COUNT};
use super::viewport::GridViewport;

/// Brackets plus up to two flag characters
const DECORATION_WIDTH: usize = 4;

/// Caret drawn inside the editing cell
const CARET: char = '|';

/// Truncate text to fit within max_chars, adding ellipsis if needed
pub fn truncate_text(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else if max_chars <= 1 {
        s.chars().take(max_chars).collect()
    } else {
        let mut result: String = s.chars().take(max_chars - 1).collect();
        result.push('…');
        result
    }
}

/// Which rows to draw and how wide each column is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderLayout {
    /// Max chars of cell content before truncation
    pub column_width: usize,
    pub top_row: usize,
    pub visible_rows: usize,
}

impl RenderLayout {
    /// Every row at the given width
    pub fn all(column_width: usize) -> Self {
        Self {
            column_width,
            top_row: 0,
            visible_rows: usize::MAX,
        }
    }

    /// The rows currently inside the viewport
    pub fn from_viewport(viewport: &GridViewport, column_width: usize) -> Self {
        Self {
            column_width,
            top_row: viewport.top_row,
            visible_rows: viewport.visible_rows,
        }
    }
}

/// Render the grid and its status line
pub fn render_grid(state: &GridState, layout: &RenderLayout) -> String {
    let model = &state.model;
    let gutter = model.row_count().max(1).to_string().len();
    let cell_width = layout.column_width + DECORATION_WIDTH;
    let mut out = String::new();

    let headers: Vec<String> = Column::ALL
        .iter()
        .map(|col| pad(&truncate_text(col.header(), layout.column_width), cell_width))
        .collect();
    out.push_str(&format!("{:>gutter$} | {}\n", "", headers.join(" | ").trim_end()));
    out.push_str(&format!(
        "{}-+-{}\n",
        "-".repeat(gutter),
        vec!["-".repeat(cell_width); COLUMN_COUNT].join("-+-")
    ));

    if model.is_empty() {
        out.push_str("(loading…)\n");
    }

    let end = layout
        .top_row
        .saturating_add(layout.visible_rows)
        .min(model.row_count());
    for row in layout.top_row.min(end)..end {
        let cells: Vec<String> = (0..COLUMN_COUNT)
            .map(|col| pad(&render_cell(state, CellPosition::new(row, col), layout), cell_width))
            .collect();
        out.push_str(&format!(
            "{:>gutter$} | {}\n",
            row + 1,
            cells.join(" | ").trim_end()
        ));
    }

    out.push_str(&status_line(state));
    out.push('\n');
    out
}

/// Text of one cell including focus brackets and flag markers
fn render_cell(state: &GridState, pos: CellPosition, layout: &RenderLayout) -> String {
    let model = &state.model;
    let Some(cell) = model.cell(pos) else {
        return String::new();
    };

    let content = match state.editing.as_ref().filter(|e| e.position == pos) {
        Some(edit) => with_caret(edit.text(), edit.buffer.cursor(), layout.column_width),
        None if model.is_placeholder_row(pos.row) => {
            format!("_{}_", truncate_text(&cell.value, layout.column_width.saturating_sub(2)))
        }
        None => {
            let text = match Column::from_index(pos.col) {
                Some(Column::Price) => format_price(&cell.value),
                _ => cell.value.clone(),
            };
            truncate_text(&text, layout.column_width)
        }
    };

    let mut rendered = if state.focused == Some(pos) {
        format!("[{}]", content)
    } else {
        content
    };
    if cell.is_dirty {
        rendered.push('*');
    }
    if cell.is_invalid {
        rendered.push('!');
    }
    rendered
}

/// Insert the caret, keeping it visible when the text is truncated
fn with_caret(text: &str, cursor: usize, width: usize) -> String {
    let mut chars: Vec<char> = text.chars().collect();
    chars.insert(cursor.min(chars.len()), CARET);
    let caret_at = cursor.min(chars.len() - 1);
    let width = width.max(1);

    let start = (caret_at + 1).saturating_sub(width);
    chars.iter().skip(start).take(width).collect()
}

fn pad(s: &str, width: usize) -> String {
    format!("{:<width$}", s)
}

/// One-line summary of save state and pending changes
pub fn status_line(state: &GridState) -> String {
    if state.save.is_saving {
        return "saving…".to_string();
    }
    if let Some(err) = &state.save.error {
        return format!("error: {}", err);
    }
    if let Some(err) = &state.load_error {
        return format!("load failed: {}", err);
    }
    pending_summary(&state.model)
}

fn pending_summary(model: &GridModel) -> String {
    if !model.can_discard() {
        return if model.has_invalid_cells() {
            format!("{} invalid cells", model.invalid_cell_count())
        } else {
            "no unsaved changes".to_string()
        };
    }

    let new_rows = model.data_rows().len().saturating_sub(model.original().len());
    let mut parts = vec![];
    if model.dirty_cell_count() > 0 {
        parts.push(format!("{} edited cells", model.dirty_cell_count()));
    }
    if new_rows > 0 {
        parts.push(format!("{} new rows", new_rows));
    }
    if model.has_invalid_cells() {
        parts.push(format!("{} invalid cells", model.invalid_cell_count()));
    }
    format!("unsaved changes ({})", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Item;

    fn state() -> GridState {
        GridState::from_items(&[Item::new(1, "Coffee", "Hot", 2.5, 10)])
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("hello", 10), "hello");
        assert_eq!(truncate_text("hello world", 6), "hello…");
        assert_eq!(truncate_text("hello", 1), "h");
        assert_eq!(truncate_text("hello", 0), "");
    }

    #[test]
    fn test_render_headers_and_price() {
        let out = render_grid(&state(), &RenderLayout::all(14));
        let first = out.lines().next().unwrap();
        for header in ["Name", "Description", "Price", "Amount"] {
            assert!(first.contains(header));
        }
        assert!(out.contains("$2.50"));
        assert!(out.contains("_Add Item..._"));
        assert!(out.ends_with("no unsaved changes\n"));
    }

    #[test]
    fn test_render_flags_and_focus() {
        let mut state = state();
        state.model.commit_cell(0, 3, "1.5");
        state.model.commit_cell(0, 1, "Iced");
        state.focused = Some(CellPosition::new(0, 0));

        let out = render_grid(&state, &RenderLayout::all(12));
        assert!(out.contains("[Coffee]"));
        assert!(out.contains("Iced*"));
        assert!(out.contains("1.5*!"));
        assert!(out.contains("unsaved changes (2 edited cells, 1 invalid cells)"));
    }

    #[test]
    fn test_render_editing_cell_shows_caret() {
        let mut state = state();
        let mut host = GridViewport::new(5);
        state.activate_cell(CellPosition::new(0, 2), &mut host);
        let out = render_grid(&state, &RenderLayout::all(12));
        assert!(out.contains("[2.5|]"));
    }

    #[test]
    fn test_caret_stays_visible_when_truncated() {
        assert_eq!(with_caret("abcdef", 6, 4), "def|");
        assert_eq!(with_caret("abcdef", 0, 4), "|abc");
    }

    #[test]
    fn test_render_window() {
        let items: Vec<Item> = (1..=5)
            .map(|i| Item::new(i, &format!("Item {}", i), "", 1.0, 1))
            .collect();
        let state = GridState::from_items(&items);
        let layout = RenderLayout {
            column_width: 10,
            top_row: 2,
            visible_rows: 2,
        };
        let out = render_grid(&state, &layout);
        assert!(out.contains("Item 3"));
        assert!(out.contains("Item 4"));
        assert!(!out.contains("Item 2"));
        assert!(!out.contains("Item 5"));
    }

    #[test]
    fn test_status_line_priority() {
        let mut state = state();
        state.load_error = Some("offline".into());
        assert_eq!(status_line(&state), "load failed: offline");
        state.save.error = Some("Row 1 has invalid data. Fix errors before saving.".into());
        assert!(status_line(&state).starts_with("error: Row 1"));
        state.save.is_saving = true;
        assert_eq!(status_line(&state), "saving…");
    }

    #[test]
    fn test_render_unloaded_grid() {
        let out = render_grid(&GridState::new(), &RenderLayout::all(8));
        assert!(out.contains("(loading…)"));
    }
}

//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::sync::Arc;

use itemgrid::grid::{CellPosition, GridState, GridViewport};
use itemgrid::item::Item;
use itemgrid::keymap::{default_bindings, KeyCode, Keymap, Keystroke, Modifiers};
use itemgrid::model::AppModel;
use itemgrid::repository::InMemoryRepository;
use itemgrid::runtime::Session;

pub fn coffee() -> Item {
    Item::new(1, "Coffee", "Hot", 2.5, 10)
}

pub fn tea() -> Item {
    Item::new(2, "Tea", "Green", 1.75, 4)
}

/// Grid loaded with the given items and a viewport host
pub fn grid_with(items: &[Item]) -> (GridState, GridViewport) {
    (GridState::from_items(items), GridViewport::new(10))
}

/// Open a cell, replace its text and commit it (without refocus)
pub fn edit_cell(grid: &mut GridState, host: &mut GridViewport, row: usize, col: usize, text: &str) {
    assert!(
        grid.activate_cell(CellPosition::new(row, col), host),
        "cell ({}, {}) could not be activated",
        row,
        col
    );
    let buffer = grid.edit_buffer_mut().expect("cell should be open");
    buffer.move_end();
    while buffer.cursor() > 0 {
        buffer.delete_backward();
    }
    buffer.insert_text(text);
    grid.commit_edit(false, host);
}

/// Fill the placeholder row as a new item
pub fn add_row(grid: &mut GridState, host: &mut GridViewport, values: [&str; 4]) {
    let row = grid.model.row_count() - 1;
    for (col, value) in values.iter().enumerate() {
        edit_cell(grid, host, row, col, value);
    }
}

pub fn key(code: KeyCode) -> Keystroke {
    Keystroke::key(code)
}

pub fn ctrl(code: KeyCode) -> Keystroke {
    Keystroke::new(code, Modifiers::CTRL)
}

pub fn cmd(code: KeyCode) -> Keystroke {
    Keystroke::new(code, Modifiers::cmd())
}

/// Session over an in-memory repository seeded with `items`
pub fn session_with(items: Vec<Item>) -> (Session, Arc<InMemoryRepository>) {
    let repo = Arc::new(InMemoryRepository::with_items(items));
    let session = Session::new(
        AppModel::default(),
        repo.clone(),
        GridViewport::new(10),
        Keymap::with_bindings(default_bindings()),
    );
    (session, repo)
}

/// Session that has finished its initial load
pub async fn loaded_session(items: Vec<Item>) -> (Session, Arc<InMemoryRepository>) {
    let (mut session, repo) = session_with(items);
    session.start();
    session.settle().await;
    repo.clear_events().await;
    (session, repo)
}

/// Type text key by key through the session's keymap
pub fn type_keys(session: &mut Session, text: &str) {
    for ch in text.chars() {
        let keystroke = if ch == ' ' {
            Keystroke::key(KeyCode::Space)
        } else if ch.is_uppercase() {
            Keystroke::shift(KeyCode::Char(ch.to_ascii_lowercase()))
        } else {
            Keystroke::char(ch)
        };
        session.handle_key(keystroke);
    }
}

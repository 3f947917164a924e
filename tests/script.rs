//! Script replay tests against a file-backed store

use std::sync::Arc;

use itemgrid::config::GridConfig;
use itemgrid::grid::GridViewport;
use itemgrid::item::Item;
use itemgrid::keymap::{default_bindings, Keymap};
use itemgrid::model::AppModel;
use itemgrid::repository::{ItemRepository, JsonFileRepository};
use itemgrid::runtime::Session;
use itemgrid::script::{load_script, parse_script, run_script, ScriptError};

fn write_store(dir: &tempfile::TempDir, items: &[Item]) -> std::path::PathBuf {
    let path = dir.path().join("items.json");
    std::fs::write(&path, serde_json::to_string_pretty(items).unwrap()).unwrap();
    path
}

async fn session_for(path: &std::path::Path) -> (Session, Arc<JsonFileRepository>) {
    let repo = Arc::new(JsonFileRepository::new(path));
    let config = GridConfig {
        store: path.to_path_buf(),
        column_width: 14,
        visible_rows: 10,
        file_logging: false,
    };
    let mut session = Session::new(
        AppModel::new(config),
        repo.clone(),
        GridViewport::new(10),
        Keymap::with_bindings(default_bindings()),
    );
    session.start();
    session.settle().await;
    (session, repo)
}

#[tokio::test]
async fn test_script_edits_and_saves_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_store(&dir, &[Item::new(1, "Coffee", "", 2.5, 10)]);
    let (mut session, repo) = session_for(&path).await;

    let steps = parse_script(
        "# raise the price, add tea\n\
         click 0 2\n\
         key end\n\
         key backspace\n\
         key backspace\n\
         key backspace\n\
         type 3.00\n\
         key enter\n\
         click 1 0\n\
         type Tea\n\
         key tab\n\
         key tab\n\
         key enter\n\
         type 1.50\n\
         key tab\n\
         key enter\n\
         type 5\n\
         blur\n\
         print\n\
         key cmd+s\n\
         print\n",
    )
    .unwrap();

    let mut out = Vec::new();
    run_script(&mut session, &steps, &mut out).await.unwrap();
    let out = String::from_utf8(out).unwrap();

    let stored = repo.list_items().await.unwrap();
    assert_eq!(
        stored,
        vec![
            Item::new(1, "Coffee", "", 3.0, 10),
            Item::new(2, "Tea", "", 1.5, 5),
        ]
    );

    let (before, after) = out.split_once("unsaved changes").unwrap();
    assert!(before.contains("$3.00*"));
    assert!(after.contains("no unsaved changes"));
    assert!(!session.model().grid.model.can_discard());
}

#[tokio::test]
async fn test_script_undo_and_discard() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_store(&dir, &[Item::new(1, "Coffee", "Hot", 2.5, 10)]);
    let (mut session, _repo) = session_for(&path).await;

    let steps = parse_script(
        "click 0 0\ntype  Beans\nblur\nundo 1\nclick 1 0\ntype Tea\nblur\ndiscard\n",
    )
    .unwrap();
    let mut out = Vec::new();
    run_script(&mut session, &steps, &mut out).await.unwrap();

    let grid = &session.model().grid;
    assert_eq!(grid.model.row_count(), 2);
    assert!(!grid.model.can_discard());
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_script_stops_on_quit() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_store(&dir, &[]);
    let (mut session, _repo) = session_for(&path).await;

    let steps = parse_script("key cmd+q\nprint\n").unwrap();
    let mut out = Vec::new();
    run_script(&mut session, &steps, &mut out).await.unwrap();

    assert!(session.model().should_quit);
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_missing_store_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let (mut session, _repo) = session_for(&dir.path().join("none.json")).await;

    assert!(session.model().grid.load_error.is_none());
    assert_eq!(session.model().grid.model.row_count(), 1);
    assert!(session.render().contains("_Add Item..._"));
}

#[test]
fn test_load_script_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_script(&dir.path().join("missing.txt")).unwrap_err();
    assert!(matches!(err, ScriptError::Read { .. }));
}

//! Save reconciliation tests
//!
//! Ordering of repository calls, abort-before-write on invalid rows,
//! post-save reload, and partial failure followed by retry.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{add_row, coffee, edit_cell, grid_with, loaded_session, tea};
use itemgrid::grid::reconcile::{plan_save, save};
use itemgrid::grid::{CellPosition, SaveError};
use itemgrid::item::{Item, ItemPayload};
use itemgrid::messages::{GridMsg, Msg};
use itemgrid::repository::{
    InMemoryRepository, ItemRepository, RepositoryCall, RepositoryError, RepositoryEvent,
};

// ========================================================================
// Ordering
// ========================================================================

#[tokio::test]
async fn test_creates_run_one_at_a_time_in_row_order() {
    let repo = InMemoryRepository::new().with_latency(Duration::from_millis(5));
    let (mut grid, mut host) = grid_with(&[]);
    add_row(&mut grid, &mut host, ["A", "", "1", "1"]);
    add_row(&mut grid, &mut host, ["B", "", "2", "2"]);
    add_row(&mut grid, &mut host, ["C", "", "3", "3"]);

    let items = save(&grid.model, &repo).await.unwrap();

    let names: Vec<_> = items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, ["A", "B", "C"]);
    assert_eq!(repo.max_concurrent_creates(), 1);

    let create = |name: &str, n: f64, a: u32| RepositoryCall::Create(ItemPayload::new(name, "", n, a));
    assert_eq!(
        repo.events().await,
        vec![
            RepositoryEvent::Started(create("A", 1.0, 1)),
            RepositoryEvent::Finished(create("A", 1.0, 1)),
            RepositoryEvent::Started(create("B", 2.0, 2)),
            RepositoryEvent::Finished(create("B", 2.0, 2)),
            RepositoryEvent::Started(create("C", 3.0, 3)),
            RepositoryEvent::Finished(create("C", 3.0, 3)),
            RepositoryEvent::Started(RepositoryCall::List),
            RepositoryEvent::Finished(RepositoryCall::List),
        ]
    );
}

#[tokio::test]
async fn test_updates_overlap_and_reload_waits_for_all() {
    let repo = InMemoryRepository::with_items(vec![coffee(), tea()])
        .with_latency(Duration::from_millis(5));
    let (mut grid, mut host) = grid_with(&[coffee(), tea()]);
    edit_cell(&mut grid, &mut host, 0, 3, "11");
    edit_cell(&mut grid, &mut host, 1, 3, "12");

    save(&grid.model, &repo).await.unwrap();

    assert_eq!(repo.max_concurrent_updates(), 2);
    let events = repo.events().await;
    let list_started = events
        .iter()
        .position(|e| *e == RepositoryEvent::Started(RepositoryCall::List))
        .unwrap();
    let finished_updates = events[..list_started]
        .iter()
        .filter(|e| matches!(e, RepositoryEvent::Finished(RepositoryCall::Update(..))))
        .count();
    assert_eq!(finished_updates, 2);
}

// ========================================================================
// Scenarios
// ========================================================================

#[tokio::test]
async fn test_reconciliation_scenario() {
    let repo = InMemoryRepository::with_items(vec![Item::new(1, "Coffee", "", 2.5, 10)]);
    let (mut grid, mut host) = grid_with(&repo.items().await);

    edit_cell(&mut grid, &mut host, 0, 2, "3.00");
    add_row(&mut grid, &mut host, ["Tea", "", "1.50", "5"]);

    let items = save(&grid.model, &repo).await.unwrap();

    let mut writes = repo.write_calls().await;
    writes.sort_by_key(|c| matches!(c, RepositoryCall::Update(..)));
    assert_eq!(
        writes,
        vec![
            RepositoryCall::Create(ItemPayload::new("Tea", "", 1.5, 5)),
            RepositoryCall::Update(1, ItemPayload::new("Coffee", "", 3.0, 10)),
        ]
    );

    grid.apply_items(&items);
    assert_eq!(grid.model.row_count(), 3);
    assert_eq!(grid.model.backing_ids(), &[Some(1), Some(2)]);
    assert_eq!(grid.model.value(CellPosition::new(0, 2)), "3");
    assert_eq!(grid.model.value(CellPosition::new(1, 0)), "Tea");
    assert!(grid.model.is_placeholder_row(2));
    assert!(!grid.model.has_dirty_changes());
    assert!(!grid.model.has_unsaved_rows());
}

#[tokio::test]
async fn test_invalid_row_aborts_before_any_call() {
    let repo = InMemoryRepository::with_items(vec![Item::new(1, "Coffee", "", 2.5, 10)]);
    let (mut grid, mut host) = grid_with(&repo.items().await);

    edit_cell(&mut grid, &mut host, 0, 2, "abc");
    add_row(&mut grid, &mut host, ["Tea", "", "1.50", "5"]);
    let before = grid.model.rows().to_vec();

    let err = save(&grid.model, &repo).await.unwrap_err();
    assert_eq!(err, SaveError::Validation { row: 1 });
    assert!(repo.calls().await.is_empty());
    assert_eq!(grid.model.rows(), before.as_slice());
    assert!(grid.model.has_invalid_cells());
}

#[test]
fn test_unmodified_rows_are_not_resent() {
    let (mut grid, mut host) = grid_with(&[coffee(), tea()]);
    edit_cell(&mut grid, &mut host, 1, 0, "Tea");
    edit_cell(&mut grid, &mut host, 0, 1, "Iced");

    let plan = plan_save(&grid.model).unwrap();
    assert!(plan.creates.is_empty());
    assert_eq!(plan.updates.len(), 1);
    assert_eq!(plan.updates[0].0, 1);
}

// ========================================================================
// Failures
// ========================================================================

#[tokio::test]
async fn test_failed_update_reports_backend_message() {
    let repo = InMemoryRepository::with_items(vec![coffee(), tea()]);
    repo.fail_update(2, RepositoryError::Rejected("Item amount cannot be negative.".into()))
        .await;
    let (mut grid, mut host) = grid_with(&[coffee(), tea()]);
    edit_cell(&mut grid, &mut host, 0, 3, "20");
    edit_cell(&mut grid, &mut host, 1, 3, "30");

    let err = save(&grid.model, &repo).await.unwrap_err();
    assert_eq!(err.user_message(), "Item amount cannot be negative.");

    // The other update still landed and nothing was reloaded
    assert_eq!(repo.items().await[0].amount, 20);
    assert!(!repo.calls().await.contains(&RepositoryCall::List));
}

#[tokio::test]
async fn test_empty_backend_message_falls_back_to_generic() {
    let repo = InMemoryRepository::new();
    repo.fail_create_named("Tea", RepositoryError::Rejected("  ".into()))
        .await;
    let (mut grid, mut host) = grid_with(&[]);
    add_row(&mut grid, &mut host, ["Tea", "", "1", "1"]);

    let err = save(&grid.model, &repo).await.unwrap_err();
    assert_eq!(
        err.user_message(),
        "Failed to save changes. Please try again."
    );
}

#[tokio::test]
async fn test_partial_failure_then_retry_through_session() {
    let (mut session, repo) = loaded_session(vec![coffee()]).await;

    for (row, name) in [(1, "Tea"), (2, "Mocha")] {
        session.dispatch(Msg::Grid(GridMsg::Click { row, col: 0 }));
        session.dispatch(Msg::Grid(GridMsg::InsertText(name.into())));
        session.dispatch(Msg::Grid(GridMsg::Click { row, col: 2 }));
        session.dispatch(Msg::Grid(GridMsg::InsertText("2".into())));
        session.dispatch(Msg::Grid(GridMsg::Click { row, col: 3 }));
        session.dispatch(Msg::Grid(GridMsg::InsertText("1".into())));
    }
    session.dispatch(Msg::Grid(GridMsg::Blur));

    repo.fail_create_named("Mocha", RepositoryError::Transport("connection reset".into()))
        .await;
    session.dispatch(Msg::Grid(GridMsg::Save));
    session.settle().await;

    let grid = &session.model().grid;
    assert_eq!(grid.save.error.as_deref(), Some("connection reset"));
    // Grid keeps its pre-save state; the Tea create already happened
    assert_eq!(grid.model.backing_ids(), &[Some(1), None, None]);
    assert_eq!(repo.items().await.len(), 2);

    repo.clear_failures().await;
    repo.clear_events().await;
    session.dispatch(Msg::Grid(GridMsg::Save));
    session.settle().await;

    let grid = &session.model().grid;
    assert!(grid.save.error.is_none());
    assert!(!grid.model.can_discard());
    // Retry re-diffs against the unchanged baseline, so Tea is sent again
    assert_eq!(
        repo.write_calls().await,
        vec![
            RepositoryCall::Create(ItemPayload::new("Tea", "", 2.0, 1)),
            RepositoryCall::Create(ItemPayload::new("Mocha", "", 2.0, 1)),
        ]
    );
    assert_eq!(repo.list_items().await.unwrap().len(), 4);
}

#[tokio::test]
async fn test_reload_failure_after_writes_is_reported() {
    let (mut session, repo) = loaded_session(vec![coffee()]).await;
    session.dispatch(Msg::Grid(GridMsg::Click { row: 0, col: 3 }));
    session.dispatch(Msg::Grid(GridMsg::InsertText("5".into())));
    repo.fail_list(RepositoryError::Transport("timeout".into()))
        .await;

    session.dispatch(Msg::Grid(GridMsg::Save));
    session.settle().await;

    assert_eq!(repo.items().await[0].amount, 105);
    let grid = &session.model().grid;
    assert_eq!(grid.save.error.as_deref(), Some("timeout"));
    assert!(grid.model.has_dirty_changes());
}

#[tokio::test]
async fn test_shared_repository_handle() {
    let repo: Arc<dyn ItemRepository> = Arc::new(InMemoryRepository::with_items(vec![coffee()]));
    let (mut grid, mut host) = grid_with(&repo.list_items().await.unwrap());
    edit_cell(&mut grid, &mut host, 0, 0, "Espresso");

    let items = save(&grid.model, repo.as_ref()).await.unwrap();
    assert_eq!(items[0].name, "Espresso");
}

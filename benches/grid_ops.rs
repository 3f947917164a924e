//! Benchmarks for grid hot paths: loading, commits, navigation, save planning, rendering
//!
//! Run with: cargo bench grid_ops

use itemgrid::grid::reconcile::plan_save;
use itemgrid::grid::render::{render_grid, RenderLayout};
use itemgrid::grid::{navigation, CellPosition, GridModel, GridState, GridViewport};
use itemgrid::item::Item;
use itemgrid::keymap::{KeyCode, Keystroke};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

fn make_items(count: usize) -> Vec<Item> {
    (0..count)
        .map(|i| {
            Item::new(
                i as i64 + 1,
                &format!("Item {}", i),
                "House blend",
                1.0 + (i % 20) as f64 * 0.25,
                (i % 50) as u32,
            )
        })
        .collect()
}

/// Grid with every tenth row's amount edited
fn make_dirty_grid(count: usize) -> GridState {
    let mut grid = GridState::from_items(&make_items(count));
    for row in (0..count).step_by(10) {
        grid.model.commit_cell(row, 3, "99");
    }
    grid
}

// ============================================================================
// Loading
// ============================================================================

#[divan::bench(args = [100, 1000, 10000])]
fn load_items(bencher: divan::Bencher, count: usize) {
    let items = make_items(count);
    bencher.bench_local(|| divan::black_box(GridModel::from_items(&items)));
}

// ============================================================================
// Cell commits
// ============================================================================

#[divan::bench(args = [100, 1000, 10000])]
fn commit_price_cell(bencher: divan::Bencher, count: usize) {
    let mut model = GridModel::from_items(&make_items(count));
    let row = count / 2;
    let mut toggle = false;

    bencher.bench_local(|| {
        toggle = !toggle;
        let raw = if toggle { "$4.50" } else { "abc" };
        divan::black_box(model.commit_cell(row, 2, raw))
    });
}

#[divan::bench(args = [100, 1000, 10000])]
fn dirty_summary(bencher: divan::Bencher, count: usize) {
    let grid = make_dirty_grid(count);
    bencher.bench_local(|| {
        divan::black_box((
            grid.model.has_dirty_changes(),
            grid.model.dirty_cell_count(),
            grid.model.invalid_cell_count(),
        ))
    });
}

// ============================================================================
// Navigation
// ============================================================================

#[divan::bench(args = [100, 1000])]
fn tab_through_rows(bencher: divan::Bencher, count: usize) {
    let tab = Keystroke::key(KeyCode::Tab);

    bencher
        .with_inputs(|| {
            let mut grid = GridState::from_items(&make_items(count));
            let mut host = GridViewport::new(25);
            grid.focus_cell(0, 0, &mut host);
            (grid, host)
        })
        .bench_local_values(|(mut grid, mut host)| {
            for _ in 0..count {
                navigation::handle_key(&mut grid, tab, &mut host);
            }
            divan::black_box(grid.focused)
        });
}

#[divan::bench]
fn edit_and_move_down() {
    let mut grid = GridState::from_items(&make_items(200));
    let mut host = GridViewport::new(25);
    grid.activate_cell(CellPosition::new(0, 0), &mut host);

    for _ in 0..199 {
        navigation::handle_key(&mut grid, Keystroke::key(KeyCode::Down), &mut host);
        navigation::handle_key(&mut grid, Keystroke::key(KeyCode::Enter), &mut host);
    }
    divan::black_box(grid.focused);
}

// ============================================================================
// Save planning
// ============================================================================

#[divan::bench(args = [100, 1000, 10000])]
fn plan_save_dirty(bencher: divan::Bencher, count: usize) {
    let grid = make_dirty_grid(count);
    bencher.bench_local(|| divan::black_box(plan_save(&grid.model)));
}

// ============================================================================
// Rendering
// ============================================================================

#[divan::bench(args = [10, 25, 50])]
fn render_visible_rows(bencher: divan::Bencher, visible_rows: usize) {
    let grid = make_dirty_grid(10_000);
    let mut host = GridViewport::new(visible_rows);
    host.ensure_visible(5_000);
    let layout = RenderLayout::from_viewport(&host, 14);

    bencher.bench_local(|| divan::black_box(render_grid(&grid, &layout)));
}

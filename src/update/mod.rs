//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod app;
mod grid;

use crate::commands::Cmd;
use crate::grid::FocusHost;
use crate::messages::Msg;
use crate::model::AppModel;

#[cfg(debug_assertions)]
use crate::tracing::GridSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use app::update_app;
pub use grid::update_grid;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut AppModel, msg: Msg, host: &mut dyn FocusHost) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg, host)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg, host)
    }
}

/// Inner update logic (no tracing)
fn update_inner(model: &mut AppModel, msg: Msg, host: &mut dyn FocusHost) -> Option<Cmd> {
    match msg {
        Msg::Grid(m) => grid::update_grid(model, m, host),
        Msg::App(m) => app::update_app(model, m),
    }
}

/// Traced update wrapper (debug builds only)
///
/// Captures before/after grid state, logs the diff and checks grid invariants.
#[cfg(debug_assertions)]
fn update_traced(model: &mut AppModel, msg: Msg, host: &mut dyn FocusHost) -> Option<Cmd> {
    let msg_name = msg_type_name(&msg);
    let _span = span!(Level::DEBUG, "update", msg = %msg_name).entered();

    let before = GridSnapshot::from_grid(&model.grid);
    debug!(target: "message", msg = %msg_name, "processing");

    let result = update_inner(model, msg, host);

    let after = GridSnapshot::from_grid(&model.grid);
    if let Some(diff) = before.diff(&after) {
        debug!(target: "grid", %diff, "state changed");
    }

    if let Err(violation) = model.grid.model.check_invariants() {
        panic!("grid invariant violated after {}: {}", msg_name, violation);
    }

    result
}

/// Get a display name for a message type
///
/// Example outputs:
/// - `Grid::Key(Ctrl+S)`
/// - `Grid::Click { row: 1, col: 2 }`
/// - `App::ItemsLoaded(gen 3, 12 items)`
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    use crate::messages::{AppMsg, GridMsg};

    match msg {
        Msg::Grid(GridMsg::Key(ks)) => format!("Grid::Key({})", ks),
        Msg::Grid(m) => format!("Grid::{:?}", m),
        Msg::App(AppMsg::ItemsLoaded { generation, result }) => match result {
            Ok(items) => format!("App::ItemsLoaded(gen {}, {} items)", generation, items.len()),
            Err(e) => format!("App::ItemsLoaded(gen {}, error: {})", generation, e),
        },
        Msg::App(AppMsg::SaveCompleted(result)) => match result {
            Ok(items) => format!("App::SaveCompleted({} items)", items.len()),
            Err(e) => format!("App::SaveCompleted(error: {})", e),
        },
        Msg::App(m) => format!("App::{:?}", m),
    }
}

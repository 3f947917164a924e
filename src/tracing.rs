//! Logging setup and grid state diffing for development diagnostics
//!
//! # Usage
//!
//! Configure console output via the RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=message=debug,grid=debug` - scoped filtering
//! - `RUST_LOG=itemgrid::grid::reconcile=debug` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/itemgrid/logs/itemgrid.log` with daily rotation,
//! at debug level.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::grid::{CellPosition, GridState};

/// Initialize tracing with a console layer and, optionally, a rolling log file
pub fn init(file_logging: bool) {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = if file_logging {
        match crate::config_paths::ensure_logs_dir() {
            Ok(logs_dir) => {
                let file_appender = tracing_appender::rolling::daily(logs_dir, "itemgrid.log");
                Some(
                    fmt::layer()
                        .with_writer(file_appender)
                        .with_ansi(false)
                        .with_target(true)
                        .with_line_number(true)
                        .with_filter(EnvFilter::new("debug")),
                )
            }
            Err(e) => {
                eprintln!("Warning: Could not initialize file logging: {}", e);
                None
            }
        }
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight snapshot of grid state for diffing across one update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSnapshot {
    pub row_count: usize,
    pub focused: Option<CellPosition>,
    pub editing: Option<CellPosition>,
    pub dirty_cells: usize,
    pub invalid_cells: usize,
    pub is_saving: bool,
}

impl GridSnapshot {
    pub fn from_grid(grid: &GridState) -> Self {
        Self {
            row_count: grid.model.row_count(),
            focused: grid.focused,
            editing: grid.editing_position(),
            dirty_cells: grid.model.dirty_cell_count(),
            invalid_cells: grid.model.invalid_cell_count(),
            is_saving: grid.save.is_saving,
        }
    }

    /// Describe what changed between two snapshots
    pub fn diff(&self, other: &GridSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.row_count != other.row_count {
            changes.push(format!("rows: {} → {}", self.row_count, other.row_count));
        }
        if self.focused != other.focused {
            changes.push(format!(
                "focus: {} → {}",
                fmt_pos(self.focused),
                fmt_pos(other.focused)
            ));
        }
        if self.editing != other.editing {
            changes.push(format!(
                "editing: {} → {}",
                fmt_pos(self.editing),
                fmt_pos(other.editing)
            ));
        }
        if self.dirty_cells != other.dirty_cells || self.invalid_cells != other.invalid_cells {
            changes.push(format!(
                "dirty/invalid: {}/{} → {}/{}",
                self.dirty_cells, self.invalid_cells, other.dirty_cells, other.invalid_cells
            ));
        }
        if self.is_saving != other.is_saving {
            changes.push(format!("saving: {}", other.is_saving));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}

fn fmt_pos(pos: Option<CellPosition>) -> String {
    match pos {
        Some(p) => format!("({},{})", p.row, p.col),
        None => "-".to_string(),
    }
}

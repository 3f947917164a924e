//! Application model - the complete state of one grid session
//!
//! Follows the Elm Architecture: only `update` mutates it.

use crate::config::GridConfig;
use crate::grid::GridState;
use crate::keymap::KeyContext;

/// The complete application model
#[derive(Debug, Clone, Default)]
pub struct AppModel {
    pub grid: GridState,
    pub config: GridConfig,
    /// Generation of the newest load request; older results are stale
    pub load_generation: u64,
    /// A load request is outstanding
    pub loading: bool,
    pub should_quit: bool,
}

impl AppModel {
    pub fn new(config: GridConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Start a new load request, superseding any outstanding one
    pub fn next_load_generation(&mut self) -> u64 {
        self.load_generation += 1;
        self.load_generation
    }

    /// Context for conditional keybindings
    pub fn key_context(&self) -> KeyContext {
        KeyContext {
            editing: self.grid.is_editing(),
            has_focus: self.grid.focused.is_some(),
        }
    }
}

//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.

use crate::grid::SavePlan;

/// Side effects requested by `update`, executed by the session
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Grid state changed and should be redrawn
    Redraw,
    /// Fetch the item list; the result comes back as `AppMsg::ItemsLoaded`
    LoadItems { generation: u64 },
    /// Run a validated save plan; the result comes back as `AppMsg::SaveCompleted`
    SaveItems(SavePlan),
    /// Request application exit
    Quit,
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Redraw => true,
            // Loading and saving redraw when their results arrive
            Cmd::LoadItems { .. } => false,
            Cmd::SaveItems(_) => true,
            Cmd::Quit => false,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
        }
    }

    /// Check if this command starts repository work
    pub fn is_async(&self) -> bool {
        match self {
            Cmd::LoadItems { .. } | Cmd::SaveItems(_) => true,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.is_async()),
            _ => false,
        }
    }
}

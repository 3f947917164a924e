//! Context system for conditional keybindings
//!
//! Enables bindings that only activate under certain grid states,
//! such as "Ctrl+Z undoes the focused row unless a cell is open".

use serde::Deserialize;

/// Context extracted from the grid for keybinding evaluation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyContext {
    /// A cell is open for editing
    pub editing: bool,
    /// Some cell has keyboard focus
    pub has_focus: bool,
}

/// Conditions that can be attached to keybindings
///
/// Multiple conditions on a binding are ANDed together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Editing,
    NotEditing,
    HasFocus,
}

impl Condition {
    pub fn evaluate(self, ctx: &KeyContext) -> bool {
        match self {
            Condition::Editing => ctx.editing,
            Condition::NotEditing => !ctx.editing,
            Condition::HasFocus => ctx.has_focus,
        }
    }

    /// Evaluate all conditions (AND logic)
    pub fn evaluate_all(conditions: &[Condition], ctx: &KeyContext) -> bool {
        conditions.iter().all(|c| c.evaluate(ctx))
    }
}

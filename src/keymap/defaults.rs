//! Default keybindings for the grid
//!
//! The embedded keymap.yaml is the source of truth; the hardcoded table is
//! used only if it fails to parse.

use std::path::Path;

use super::binding::Keybinding;
use super::command::Command;
use super::config::{load_keymap_file, parse_keymap_yaml};
use super::context::Condition;
use super::types::{KeyCode, Keystroke, Modifiers};

/// Default keymap YAML embedded at compile time
const DEFAULT_KEYMAP_YAML: &str = include_str!("../../keymap.yaml");

pub fn get_default_keymap_yaml() -> &'static str {
    DEFAULT_KEYMAP_YAML
}

/// Load and merge keymaps: embedded defaults + user overrides
///
/// User bindings with `command: Unbound` remove matching default bindings.
pub fn load_default_keymap() -> Vec<Keybinding> {
    load_keymap_with_overrides(crate::config_paths::keymap_file().as_deref())
}

/// Same as [`load_default_keymap`] with an explicit override file
pub fn load_keymap_with_overrides(user_path: Option<&Path>) -> Vec<Keybinding> {
    let mut bindings = match parse_keymap_yaml(DEFAULT_KEYMAP_YAML) {
        Ok(b) => {
            tracing::info!("Loaded embedded default keymap ({} bindings)", b.len());
            b
        }
        Err(e) => {
            tracing::warn!(
                "Failed to parse embedded keymap: {}, using hardcoded defaults",
                e
            );
            default_bindings()
        }
    };

    if let Some(user_path) = user_path.filter(|p| p.exists()) {
        match load_keymap_file(user_path) {
            Ok(user_bindings) => {
                tracing::info!(
                    "Merging user keymap from {} ({} bindings)",
                    user_path.display(),
                    user_bindings.len()
                );
                bindings = merge_bindings(bindings, user_bindings);
            }
            Err(e) => {
                tracing::warn!("Failed to load user keymap from {}: {}", user_path.display(), e);
            }
        }
    }

    bindings
}

/// Merge user bindings into base bindings
///
/// - same keystroke and conditions: replaces the base binding
/// - `Unbound`: removes every base binding for that keystroke
/// - otherwise the user binding is added
pub fn merge_bindings(base: Vec<Keybinding>, user: Vec<Keybinding>) -> Vec<Keybinding> {
    let mut result = base;

    for user_binding in user {
        if user_binding.command == Command::Unbound {
            result.retain(|b| b.keystroke != user_binding.keystroke);
            continue;
        }

        let existing_idx = result
            .iter()
            .position(|b| b.keystroke == user_binding.keystroke && b.when == user_binding.when);

        match existing_idx {
            Some(idx) => result[idx] = user_binding,
            None => result.push(user_binding),
        }
    }

    result
}

/// Hardcoded fallback bindings, mirroring keymap.yaml
pub fn default_bindings() -> Vec<Keybinding> {
    let cmd = Modifiers::cmd();

    vec![
        bind(KeyCode::Char('s'), cmd, Command::Save),
        bind(KeyCode::Char('z'), cmd, Command::UndoRow)
            .when(vec![Condition::NotEditing, Condition::HasFocus]),
        bind(KeyCode::Char('d'), cmd | Modifiers::SHIFT, Command::DiscardChanges),
        bind(KeyCode::Char('q'), cmd, Command::Quit),
    ]
}

fn bind(key: KeyCode, mods: Modifiers, command: Command) -> Keybinding {
    Keybinding::new(Keystroke::new(key, mods), command)
}

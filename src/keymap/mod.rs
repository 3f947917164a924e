//! Configurable keyboard mapping for grid-level commands
//!
//! Maps keystrokes to commands (save, discard, undo row, quit), with
//! `when` conditions evaluated against the grid state and user overrides
//! loaded from YAML.
//!
//! # Architecture
//!
//! ```text
//! Keystroke → Keymap::handle_keystroke() → Command → Vec<Msg>
//!                         │
//!                         └── NoMatch → GridMsg::Key (navigation, then cell buffer)
//! ```

mod binding;
mod command;
mod config;
mod context;
mod defaults;
#[allow(clippy::module_inception)]
mod keymap;
mod types;

pub use binding::Keybinding;
pub use command::Command;
pub use config::{load_keymap_file, parse_key_string, parse_keymap_yaml, KeymapError};
pub use context::{Condition, KeyContext};
pub use defaults::{
    default_bindings, get_default_keymap_yaml, load_default_keymap, load_keymap_with_overrides,
    merge_bindings,
};
pub use keymap::{KeyAction, Keymap};
pub use types::{KeyCode, Keystroke, Modifiers};

//! Keybinding struct representing a mapping from a keystroke to a command

use super::command::Command;
use super::context::Condition;
use super::types::Keystroke;

/// A single keybinding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybinding {
    pub keystroke: Keystroke,
    pub command: Command,
    /// Conditions that must all hold for this binding to activate
    pub when: Option<Vec<Condition>>,
}

impl Keybinding {
    pub fn new(keystroke: Keystroke, command: Command) -> Self {
        Self {
            keystroke,
            command,
            when: None,
        }
    }

    /// Add conditions to this binding (builder pattern)
    pub fn when(mut self, conditions: Vec<Condition>) -> Self {
        self.when = Some(conditions);
        self
    }

    pub fn when_single(mut self, condition: Condition) -> Self {
        self.when = Some(vec![condition]);
        self
    }

    pub fn matches(&self, keystroke: &Keystroke) -> bool {
        self.keystroke == *keystroke
    }

    pub fn display_string(&self) -> String {
        self.keystroke.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::types::{KeyCode, Modifiers};

    #[test]
    fn test_single_binding() {
        let stroke = Keystroke::new(KeyCode::Char('s'), Modifiers::CTRL);
        let binding = Keybinding::new(stroke, Command::Save);

        assert!(binding.matches(&stroke));
        assert!(!binding.matches(&Keystroke::char('s')));
        assert_eq!(binding.when, None);
    }

    #[test]
    fn test_conditional_binding() {
        let stroke = Keystroke::new(KeyCode::Char('z'), Modifiers::CTRL);
        let binding = Keybinding::new(stroke, Command::UndoRow).when_single(Condition::NotEditing);
        assert_eq!(binding.when, Some(vec![Condition::NotEditing]));
        assert_eq!(binding.display_string(), "Ctrl+Z");
    }
}

//! Keyboard shortcut registry.
//!
//! Chords are declared in a table and resolved with a pure lookup, so the
//! bindings are testable without simulating any keyboard events.

use inkwall_core::ToolKind;

/// Actions a key chord can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SelectTool(ToolKind),
    Undo,
    Redo,
    ClearCanvas,
    Save,
}

/// A key chord bound to an action.
#[derive(Debug, Clone, Copy)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub shift: bool,
    pub action: Action,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        ctrl: bool,
        shift: bool,
        action: Action,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            ctrl,
            shift,
            action,
            description,
        }
    }

    /// Format the chord for display (e.g., "Ctrl+Shift+Z").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }
}

/// All registered shortcuts.
pub const SHORTCUTS: &[Shortcut] = &[
    Shortcut::new("Z", true, false, Action::Undo, "Undo"),
    Shortcut::new("Z", true, true, Action::Redo, "Redo"),
    Shortcut::new("Y", true, false, Action::Redo, "Redo"),
    Shortcut::new("S", true, false, Action::Save, "Submit drawing"),
    Shortcut::new("P", false, false, Action::SelectTool(ToolKind::Pencil), "Pencil"),
    Shortcut::new("E", false, false, Action::SelectTool(ToolKind::Eraser), "Eraser"),
    Shortcut::new("Delete", false, false, Action::ClearCanvas, "Clear canvas"),
];

/// Resolve a key chord to its action, if any. Modifiers match exactly.
pub fn resolve(key: &str, ctrl: bool, shift: bool) -> Option<Action> {
    SHORTCUTS
        .iter()
        .find(|s| s.key.eq_ignore_ascii_case(key) && s.ctrl == ctrl && s.shift == shift)
        .map(|s| s.action)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undo_redo_chords() {
        assert_eq!(resolve("z", true, false), Some(Action::Undo));
        assert_eq!(resolve("Z", true, true), Some(Action::Redo));
        assert_eq!(resolve("y", true, false), Some(Action::Redo));
    }

    #[test]
    fn test_tool_keys_without_modifiers() {
        assert_eq!(
            resolve("p", false, false),
            Some(Action::SelectTool(ToolKind::Pencil))
        );
        assert_eq!(
            resolve("e", false, false),
            Some(Action::SelectTool(ToolKind::Eraser))
        );
        // With Ctrl held these are not tool switches.
        assert_eq!(resolve("p", true, false), None);
    }

    #[test]
    fn test_unbound_chord_resolves_to_nothing() {
        assert_eq!(resolve("q", false, false), None);
        assert_eq!(resolve("z", false, false), None);
    }

    #[test]
    fn test_format() {
        let redo = Shortcut::new("Z", true, true, Action::Redo, "Redo");
        assert_eq!(redo.format(), "Ctrl+Shift+Z");
    }
}

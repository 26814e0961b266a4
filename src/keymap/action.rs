//! Action enum representing every single-key command
//!
//! Actions are the bridge between the single-key table and the target
//! application. Each action expands to one or more `Effect`s which the
//! interceptor executes in order.

use std::fmt;
use std::str::FromStr;

use super::types::{ModifierMask, SyntheticKey};
use crate::mode::{Mode, ModeSlot};

/// All commands that can be bound to a single canonical key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Submit/confirm the current operation
    Confirm,
    /// Save the drawing
    Save,
    /// Switch to object mode
    ObjectMode,
    /// Store the current selection as an object-mode snippet
    SaveObjectMode,
    /// Switch to style-paint mode
    StyleMode,
    /// Store the current selection's style as a style-mode snippet
    SaveStyleMode,
    /// Freehand pencil tool
    Pencil,
    /// Bezier path tool
    Bezier,
    /// Edit math in the external editor, pasted as a text object
    MathInput,
    /// Edit math in the external editor, written out as a full LaTeX document
    MathInputPrerendered,
    /// Toggle snapping
    Snap,
    Undo,
    /// Delete the selection
    Delete,
    Redo,
    /// Text tool, then stop intercepting until Escape
    DisabledMode,
    /// Removes a default binding when used in a user keymap
    Unbound,
}

/// A single side effect on the target application or interceptor state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Synthesize one key press into the target window
    Press(SyntheticKey),
    /// Change the interceptor's editing mode
    SetMode(Mode),
    /// Arm a snippet save; the next single key names the slot
    PersistMode(ModeSlot),
    /// Run the math-input flow
    OpenMathEditor { prerendered: bool },
}

impl Action {
    /// Expand into the effects to execute, in order
    pub fn to_effects(self) -> Vec<Effect> {
        let ctrl = ModifierMask::CONTROL;
        let ctrl_shift = ModifierMask::CONTROL | ModifierMask::SHIFT;

        match self {
            Action::Confirm => vec![Effect::Press(SyntheticKey::key("Return"))],
            Action::Save => vec![Effect::Press(SyntheticKey::new("s", ctrl))],
            Action::ObjectMode => vec![Effect::SetMode(Mode::Object)],
            Action::SaveObjectMode => vec![Effect::PersistMode(ModeSlot::Object)],
            Action::StyleMode => vec![Effect::SetMode(Mode::StylePaint)],
            Action::SaveStyleMode => vec![Effect::PersistMode(ModeSlot::Style)],
            Action::Pencil => vec![Effect::Press(SyntheticKey::key("p"))],
            Action::Bezier => vec![Effect::Press(SyntheticKey::key("b"))],
            Action::MathInput => vec![Effect::OpenMathEditor { prerendered: false }],
            Action::MathInputPrerendered => vec![Effect::OpenMathEditor { prerendered: true }],
            Action::Snap => vec![Effect::Press(SyntheticKey::new(
                "percent",
                ModifierMask::SHIFT,
            ))],
            Action::Undo => vec![Effect::Press(SyntheticKey::new("z", ctrl))],
            Action::Delete => vec![Effect::Press(SyntheticKey::key("Delete"))],
            Action::Redo => vec![Effect::Press(SyntheticKey::new("z", ctrl_shift))],
            Action::DisabledMode => vec![
                Effect::Press(SyntheticKey::key("t")),
                Effect::SetMode(Mode::Disabled),
            ],
            Action::Unbound => vec![],
        }
    }

    /// Every bindable action, for validation and listing
    pub const ALL: [Action; 15] = [
        Action::Confirm,
        Action::Save,
        Action::ObjectMode,
        Action::SaveObjectMode,
        Action::StyleMode,
        Action::SaveStyleMode,
        Action::Pencil,
        Action::Bezier,
        Action::MathInput,
        Action::MathInputPrerendered,
        Action::Snap,
        Action::Undo,
        Action::Delete,
        Action::Redo,
        Action::DisabledMode,
    ];

    /// Name used in keymap files
    pub fn name(self) -> &'static str {
        match self {
            Action::Confirm => "Confirm",
            Action::Save => "Save",
            Action::ObjectMode => "ObjectMode",
            Action::SaveObjectMode => "SaveObjectMode",
            Action::StyleMode => "StyleMode",
            Action::SaveStyleMode => "SaveStyleMode",
            Action::Pencil => "Pencil",
            Action::Bezier => "Bezier",
            Action::MathInput => "MathInput",
            Action::MathInputPrerendered => "MathInputPrerendered",
            Action::Snap => "Snap",
            Action::Undo => "Undo",
            Action::Delete => "Delete",
            Action::Redo => "Redo",
            Action::DisabledMode => "DisabledMode",
            Action::Unbound => "Unbound",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Action {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "Unbound" {
            return Ok(Action::Unbound);
        }
        Action::ALL
            .iter()
            .copied()
            .find(|action| action.name() == s)
            .ok_or(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirm_presses_return() {
        assert_eq!(
            Action::Confirm.to_effects(),
            vec![Effect::Press(SyntheticKey::key("Return"))]
        );
    }

    #[test]
    fn test_disabled_mode_presses_text_tool_first() {
        let effects = Action::DisabledMode.to_effects();
        assert_eq!(effects.len(), 2);
        assert_eq!(effects[0], Effect::Press(SyntheticKey::key("t")));
        assert_eq!(effects[1], Effect::SetMode(Mode::Disabled));
    }

    #[test]
    fn test_redo_uses_ctrl_shift_z() {
        let Effect::Press(key) = Action::Redo.to_effects()[0] else {
            panic!("expected a key press");
        };
        assert_eq!(key.to_string(), "ctrl+shift+z");
    }

    #[test]
    fn test_names_parse_back() {
        for action in Action::ALL {
            assert_eq!(action.name().parse::<Action>(), Ok(action));
        }
        assert_eq!("Unbound".parse::<Action>(), Ok(Action::Unbound));
        assert!("Explode".parse::<Action>().is_err());
    }
}

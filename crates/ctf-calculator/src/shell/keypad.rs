//! Keypad layout and keyboard map
//!
//! One table of button definitions, built once and shared by every front
//! end. Clicks resolve through the element id, key presses through
//! [`Keypad::key_to_action`].

use crate::core::{Action, Operator};
use crate::shell::style;

/// Visual family of a keypad button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    /// Digits and the decimal point
    Number,
    /// Arithmetic operators and `=`
    Operator,
    /// AC, backspace and percent
    Function,
}

impl ButtonKind {
    /// Class string for this family
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Number => style::NUMBER_BUTTON_CLASS,
            Self::Operator => style::OPERATOR_BUTTON_CLASS,
            Self::Function => style::FUNCTION_BUTTON_CLASS,
        }
    }
}

/// A single keypad button definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButtonDef {
    /// The action this button performs
    pub action: Action,
    /// Visual family
    pub kind: ButtonKind,
    /// Number of grid columns the button spans
    pub col_span: usize,
    /// The DOM element ID for this button
    pub id: String,
}

impl KeypadButtonDef {
    /// Creates a new button definition
    #[must_use]
    pub fn new(action: Action, kind: ButtonKind) -> Self {
        Self {
            action,
            kind,
            col_span: 1,
            id: element_id(action),
        }
    }

    /// Sets the column span
    #[must_use]
    pub const fn with_span(mut self, col_span: usize) -> Self {
        self.col_span = col_span;
        self
    }

    /// Button label
    #[must_use]
    pub fn label(&self) -> String {
        label(self.action)
    }

    /// Full class string: base button class followed by the family class
    #[must_use]
    pub fn class_name(&self) -> String {
        format!("{} {}", style::BASE_BUTTON_CLASS, self.kind.class())
    }

    /// Inline grid style for buttons wider than one column
    #[must_use]
    pub fn grid_column(&self) -> Option<String> {
        (self.col_span > 1).then(|| format!("span {}", self.col_span))
    }
}

/// Label printed on the button for an action
#[must_use]
pub fn label(action: Action) -> String {
    match action {
        Action::Digit(d) => d.to_string(),
        Action::Decimal => ".".to_string(),
        Action::Clear => "AC".to_string(),
        Action::Backspace => "⌫".to_string(),
        Action::Percent => "%".to_string(),
        Action::SetOperator(op) => op.glyph().to_string(),
        Action::Evaluate => "=".to_string(),
    }
}

/// Stable element id for the button producing an action
#[must_use]
pub fn element_id(action: Action) -> String {
    match action {
        Action::Digit(d) => format!("btn-{d}"),
        Action::Decimal => "btn-decimal".to_string(),
        Action::Clear => "btn-clear".to_string(),
        Action::Backspace => "btn-backspace".to_string(),
        Action::Percent => "btn-percent".to_string(),
        Action::SetOperator(op) => format!("btn-{}", op.name()),
        Action::Evaluate => "btn-equals".to_string(),
    }
}

/// Calculator keypad
/// Layout:
/// ```text
/// [ AC ] [ ⌫ ] [ % ] [ ÷ ]
/// [ 7  ] [ 8 ] [ 9 ] [ × ]
/// [ 4  ] [ 5 ] [ 6 ] [ - ]
/// [ 1  ] [ 2 ] [ 3 ] [ + ]
/// [    0     ] [ . ] [ = ]
/// ```
#[derive(Debug, Clone)]
pub struct Keypad {
    buttons: Vec<KeypadButtonDef>,
    cols: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard keypad
    #[must_use]
    pub fn new() -> Self {
        use ButtonKind::{Function, Number, Operator as Op};

        let digit = |d: u8| KeypadButtonDef::new(Action::Digit(d), Number);
        let op = |o: Operator| KeypadButtonDef::new(Action::SetOperator(o), Op);

        let buttons = vec![
            KeypadButtonDef::new(Action::Clear, Function),
            KeypadButtonDef::new(Action::Backspace, Function),
            KeypadButtonDef::new(Action::Percent, Function),
            op(Operator::Divide),
            digit(7),
            digit(8),
            digit(9),
            op(Operator::Multiply),
            digit(4),
            digit(5),
            digit(6),
            op(Operator::Subtract),
            digit(1),
            digit(2),
            digit(3),
            op(Operator::Add),
            digit(0).with_span(2),
            KeypadButtonDef::new(Action::Decimal, Number),
            KeypadButtonDef::new(Action::Evaluate, Op),
        ];

        Self { buttons, cols: 4 }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Number of grid columns
    #[must_use]
    pub fn columns(&self) -> usize {
        self.cols
    }

    /// Gets all button definitions in layout order
    #[must_use]
    pub fn buttons(&self) -> &[KeypadButtonDef] {
        &self.buttons
    }

    /// Finds a button by element ID
    #[must_use]
    pub fn find_button_by_id(&self, id: &str) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.id == id)
    }

    /// Finds the button producing an action
    #[must_use]
    pub fn find_button_by_action(&self, action: Action) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.action == action)
    }

    /// Processes a button click and returns the action
    #[must_use]
    pub fn handle_click(&self, element_id: &str) -> Option<Action> {
        self.find_button_by_id(element_id).map(|btn| btn.action)
    }

    /// Maps a keyboard `key` value to an action
    #[must_use]
    pub fn key_to_action(key: &str) -> Option<Action> {
        match key {
            "Enter" | "=" => Some(Action::Evaluate),
            "Escape" => Some(Action::Clear),
            "Backspace" => Some(Action::Backspace),
            "%" => Some(Action::Percent),
            "." => Some(Action::Decimal),
            _ => {
                let mut chars = key.chars();
                let (Some(ch), None) = (chars.next(), chars.next()) else {
                    return None;
                };
                Action::digit(ch).or_else(|| Operator::from_symbol(ch).map(Action::SetOperator))
            }
        }
    }

    /// Element id of the button a key emphasizes
    #[must_use]
    pub fn key_to_button_id(&self, key: &str) -> Option<&str> {
        let action = Self::key_to_action(key)?;
        self.find_button_by_action(action).map(|b| b.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== KeypadButtonDef tests =====

    #[test]
    fn test_button_def_ids() {
        assert_eq!(element_id(Action::Digit(5)), "btn-5");
        assert_eq!(element_id(Action::Decimal), "btn-decimal");
        assert_eq!(element_id(Action::Clear), "btn-clear");
        assert_eq!(element_id(Action::Backspace), "btn-backspace");
        assert_eq!(element_id(Action::Percent), "btn-percent");
        assert_eq!(element_id(Action::Evaluate), "btn-equals");
        assert_eq!(element_id(Action::SetOperator(Operator::Add)), "btn-plus");
        assert_eq!(
            element_id(Action::SetOperator(Operator::Subtract)),
            "btn-minus"
        );
        assert_eq!(
            element_id(Action::SetOperator(Operator::Multiply)),
            "btn-times"
        );
        assert_eq!(
            element_id(Action::SetOperator(Operator::Divide)),
            "btn-divide"
        );
    }

    #[test]
    fn test_button_labels() {
        assert_eq!(label(Action::Clear), "AC");
        assert_eq!(label(Action::Backspace), "⌫");
        assert_eq!(label(Action::SetOperator(Operator::Divide)), "÷");
        assert_eq!(label(Action::SetOperator(Operator::Multiply)), "×");
        assert_eq!(label(Action::Evaluate), "=");
    }

    #[test]
    fn test_button_class_name() {
        let btn = KeypadButtonDef::new(Action::Digit(1), ButtonKind::Number);
        let class = btn.class_name();
        assert!(class.starts_with(style::BASE_BUTTON_CLASS));
        assert!(class.ends_with(style::NUMBER_BUTTON_CLASS));
    }

    #[test]
    fn test_button_grid_column() {
        let wide = KeypadButtonDef::new(Action::Digit(0), ButtonKind::Number).with_span(2);
        assert_eq!(wide.grid_column().as_deref(), Some("span 2"));
        let narrow = KeypadButtonDef::new(Action::Decimal, ButtonKind::Number);
        assert_eq!(narrow.grid_column(), None);
    }

    // ===== Keypad tests =====

    #[test]
    fn test_keypad_layout() {
        let keypad = Keypad::new();
        assert_eq!(keypad.button_count(), 19);
        assert_eq!(keypad.columns(), 4);
        let labels: Vec<String> = keypad.buttons().iter().map(|b| b.label()).collect();
        assert_eq!(
            labels,
            [
                "AC", "⌫", "%", "÷", "7", "8", "9", "×", "4", "5", "6", "-", "1", "2", "3", "+",
                "0", ".", "="
            ]
        );
    }

    #[test]
    fn test_keypad_ids_are_unique() {
        let keypad = Keypad::new();
        let mut ids: Vec<&str> = keypad.buttons().iter().map(|b| b.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), keypad.button_count());
    }

    #[test]
    fn test_keypad_kinds() {
        let keypad = Keypad::new();
        let kind_of = |id: &str| keypad.find_button_by_id(id).unwrap().kind;
        assert_eq!(kind_of("btn-clear"), ButtonKind::Function);
        assert_eq!(kind_of("btn-plus"), ButtonKind::Operator);
        assert_eq!(kind_of("btn-equals"), ButtonKind::Operator);
        assert_eq!(kind_of("btn-decimal"), ButtonKind::Number);
        assert_eq!(keypad.find_button_by_id("btn-0").unwrap().col_span, 2);
    }

    #[test]
    fn test_handle_click() {
        let keypad = Keypad::new();
        assert_eq!(keypad.handle_click("btn-7"), Some(Action::Digit(7)));
        assert_eq!(
            keypad.handle_click("btn-times"),
            Some(Action::SetOperator(Operator::Multiply))
        );
        assert_eq!(keypad.handle_click("btn-unknown"), None);
    }

    // ===== Keyboard map tests =====

    #[test]
    fn test_key_to_action_digits() {
        for d in 0..=9u8 {
            assert_eq!(
                Keypad::key_to_action(&d.to_string()),
                Some(Action::Digit(d))
            );
        }
    }

    #[test]
    fn test_key_to_action_operators() {
        let cases = [
            ("+", Operator::Add),
            ("-", Operator::Subtract),
            ("*", Operator::Multiply),
            ("x", Operator::Multiply),
            ("X", Operator::Multiply),
            ("/", Operator::Divide),
        ];
        for (key, op) in cases {
            assert_eq!(
                Keypad::key_to_action(key),
                Some(Action::SetOperator(op)),
                "key {key}"
            );
        }
    }

    #[test]
    fn test_key_to_action_special() {
        assert_eq!(Keypad::key_to_action("Enter"), Some(Action::Evaluate));
        assert_eq!(Keypad::key_to_action("="), Some(Action::Evaluate));
        assert_eq!(Keypad::key_to_action("Escape"), Some(Action::Clear));
        assert_eq!(Keypad::key_to_action("Backspace"), Some(Action::Backspace));
        assert_eq!(Keypad::key_to_action("%"), Some(Action::Percent));
        assert_eq!(Keypad::key_to_action("."), Some(Action::Decimal));
    }

    #[test]
    fn test_key_to_action_unknown() {
        assert_eq!(Keypad::key_to_action("c"), None);
        assert_eq!(Keypad::key_to_action("^"), None);
        assert_eq!(Keypad::key_to_action("Tab"), None);
        assert_eq!(Keypad::key_to_action(""), None);
        assert_eq!(Keypad::key_to_action("12"), None);
    }

    #[test]
    fn test_key_to_button_id() {
        let keypad = Keypad::new();
        assert_eq!(keypad.key_to_button_id("x"), Some("btn-times"));
        assert_eq!(keypad.key_to_button_id("Enter"), Some("btn-equals"));
        assert_eq!(keypad.key_to_button_id("Shift"), None);
    }
}

//! Unified Calculator Driver
//!
//! Write the interaction script once, run it against every front end.
//! Each driver owns a [`Shell`](crate::shell::Shell) over its own page, so
//! the specifications below exercise the same engine, keyboard map and
//! submission flow whether the page is the mock DOM or the terminal.

use crate::core::SecretCode;
use crate::flag::{SubmitOutcome, FLAG};

/// Abstract driver trait for calculator interactions
///
/// # Example
///
/// ```rust
/// use ctf_calculator::driver::{verify_basic_arithmetic, CalculatorDriver};
/// use ctf_calculator::wasm::WasmDriver;
///
/// let mut driver = WasmDriver::new();
/// driver.press_keys("6*7=");
/// assert_eq!(driver.display(), "42");
/// verify_basic_arithmetic(&mut driver);
/// ```
pub trait CalculatorDriver {
    /// Sends one keydown/keyup pair with a DOM `key` value
    fn press_key(&mut self, key: &str);

    /// Clicks an element by id
    fn click_button(&mut self, element_id: &str);

    /// Current display text
    fn display(&self) -> String;

    /// Flag input text; `None` when the input is not on the page
    fn flag_input(&self) -> Option<String>;

    /// Replaces the flag input text
    fn type_flag(&mut self, text: &str);

    /// Makes the submit button clickable
    fn enable_submit(&mut self);

    /// Clicks the submit button; `None` when the click was dropped
    fn submit_flag(&mut self) -> Option<SubmitOutcome>;

    /// Whether completion has been persisted
    fn is_completed(&self) -> bool;

    /// Presses each character of `script` as a key
    fn press_keys(&mut self, script: &str) {
        for ch in script.chars() {
            self.press_key(&ch.to_string());
        }
    }

    /// Clears the calculator with `Escape`
    fn clear(&mut self) {
        self.press_key("Escape");
    }
}

/// TUI Driver implementation
#[cfg(feature = "tui")]
pub mod tui_driver {
    use super::CalculatorDriver;
    use crate::config::CalculatorConfig;
    use crate::core::FlagField;
    use crate::flag::{CompletionStore, MemoryStore, SubmitOutcome};
    use crate::tui::TerminalApp;

    /// TUI-specific driver wrapping the terminal app
    #[derive(Debug)]
    pub struct TuiDriver {
        app: TerminalApp<MemoryStore>,
    }

    impl Default for TuiDriver {
        fn default() -> Self {
            Self::new()
        }
    }

    impl TuiDriver {
        /// Creates a new TUI driver
        #[must_use]
        pub fn new() -> Self {
            Self::with_app(TerminalApp::new(
                MemoryStore::new(),
                CalculatorConfig::default(),
            ))
        }

        /// Creates a TUI driver with an existing app
        #[must_use]
        pub fn with_app(app: TerminalApp<MemoryStore>) -> Self {
            Self { app }
        }

        /// Returns a reference to the underlying app
        #[must_use]
        pub fn app(&self) -> &TerminalApp<MemoryStore> {
            &self.app
        }

        /// Returns a mutable reference to the underlying app
        pub fn app_mut(&mut self) -> &mut TerminalApp<MemoryStore> {
            &mut self.app
        }
    }

    impl CalculatorDriver for TuiDriver {
        fn press_key(&mut self, key: &str) {
            self.app.press_key(key);
            self.app.release_key();
        }

        fn click_button(&mut self, element_id: &str) {
            self.app.click(element_id);
        }

        fn display(&self) -> String {
            self.app.page().display().to_string()
        }

        fn flag_input(&self) -> Option<String> {
            self.app.page().flag_value()
        }

        fn type_flag(&mut self, text: &str) {
            self.app.page_mut().set_flag_value(text);
        }

        fn enable_submit(&mut self) {
            self.app.page_mut().enable_submit();
        }

        fn submit_flag(&mut self) -> Option<SubmitOutcome> {
            self.app.submit()
        }

        fn is_completed(&self) -> bool {
            self.app.shell().store().is_completed().unwrap_or(false)
        }
    }
}

#[cfg(feature = "tui")]
pub use tui_driver::TuiDriver;

// ===== Unified Test Specifications =====
// These work with ANY CalculatorDriver implementation

/// Verifies the four operations and result formatting
pub fn verify_basic_arithmetic<D: CalculatorDriver>(driver: &mut D) {
    let cases = [
        ("2+3=", "5"),
        ("10-4=", "6"),
        ("6*7=", "42"),
        ("20/4=", "5"),
        ("7/2=", "3.5"),
        ("3-8=", "-5"),
        ("1.5x4=", "6"),
        ("0.1+0.2=", "0.3"),
    ];
    for (script, expected) in cases {
        driver.clear();
        driver.press_keys(script);
        assert_eq!(driver.display(), expected, "script {script}");
    }
    driver.clear();
}

/// Verifies there is no precedence: a second operator replaces the first
/// operand instead of chaining
pub fn verify_single_pending_operator<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press_keys("2+3*4=");
    assert_eq!(driver.display(), "12");

    driver.clear();
    driver.press_keys("9+");
    assert_eq!(driver.display(), "9 +");
    driver.press_keys("-");
    assert_eq!(driver.display(), "9 -");
    driver.press_keys("4");
    assert_eq!(driver.display(), "9 - 4");
    driver.press_keys("=");
    assert_eq!(driver.display(), "5");
    driver.clear();
}

/// Verifies editing keys: backspace, percent and the decimal point
pub fn verify_editing<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press_keys("123");
    driver.press_key("Backspace");
    assert_eq!(driver.display(), "12");
    driver.press_key("Backspace");
    driver.press_key("Backspace");
    assert_eq!(driver.display(), "0");

    driver.press_keys("50%");
    assert_eq!(driver.display(), "0.5");

    driver.clear();
    driver.press_keys("1..5");
    assert_eq!(driver.display(), "1.5");
    driver.clear();
    assert_eq!(driver.display(), "0");
}

/// Verifies division by zero shows the error marker and can be escaped by
/// typing a new number
pub fn verify_error_handling<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press_keys("5/0=");
    assert_eq!(driver.display(), "Error");

    // operators on the error marker are dropped
    driver.press_keys("+");
    assert_eq!(driver.display(), "Error");

    driver.press_keys("7");
    assert_eq!(driver.display(), "7");
    driver.clear();
}

/// Verifies the key sequence that reveals the secret code
pub fn verify_secret_sequence<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.type_flag("");
    driver.press_keys("1337*1337=");
    assert_eq!(
        driver.flag_input().as_deref(),
        Some(SecretCode::INVALID_MARKER)
    );

    driver.clear();
    driver.press_keys("1337+1337=");
    assert_eq!(driver.display(), "1337 + 1337");
    assert_eq!(
        driver.flag_input().as_deref(),
        Some(SecretCode::FIRST_FRAGMENT)
    );

    driver.clear();
    driver.press_keys("1337*1337=");
    let code = driver.flag_input().unwrap_or_default();
    assert_eq!(code, SecretCode::composed());
    assert_eq!(SecretCode::decode(&code).as_deref(), Some(FLAG));
    driver.clear();
}

/// Verifies the submission flow, ending with the challenge completed
pub fn verify_submission<D: CalculatorDriver>(driver: &mut D) {
    driver.type_flag(FLAG);
    assert_eq!(driver.submit_flag(), None, "submit starts disabled");
    assert!(!driver.is_completed());

    driver.enable_submit();
    driver.type_flag(&SecretCode::composed());
    assert_eq!(driver.submit_flag(), Some(SubmitOutcome::Incorrect));
    assert!(!driver.is_completed());

    driver.type_flag(FLAG);
    assert_eq!(driver.submit_flag(), Some(SubmitOutcome::Solved));
    assert!(driver.is_completed());
}

/// Complete verification suite - runs all specifications
pub fn run_full_specification<D: CalculatorDriver>(driver: &mut D) {
    verify_basic_arithmetic(driver);
    verify_single_pending_operator(driver);
    verify_editing(driver);
    verify_error_handling(driver);
    verify_secret_sequence(driver);
    verify_submission(driver);
}

//! TUI Frontend for the calculator
//!
//! The terminal draws the same page the browser shows: display, keypad,
//! result message, flag form and share button. Tab moves focus to the flag
//! input, since every other key belongs to the calculator.

mod app;
mod input;
mod ui;

pub use app::{Focus, SubmitForm, TerminalApp, TerminalPage};
pub use input::{parse_key_script, InputHandler, KeyAction};
pub use ui::{hit_test, keypad_cells, render, CalculatorUI, KeypadCell, PageLayout};

//! CTF Calculator - a calculator page hiding a flag
//!
//! A four-function calculator with one pending operator and no precedence.
//! Two key sequences write pieces of an encoded flag into the page's flag
//! input; submitting the decoded flag completes the challenge, which is
//! remembered across sessions.
//!
//! The same [`shell::Shell`] drives every front end through the
//! [`shell::Page`] trait:
//!
//! - [`wasm::MockDom`]: in-memory DOM with a virtual clock, for tests
//! - `wasm::BrowserPage`: the real document (feature `wasm`)
//! - `tui::TerminalPage`: ratatui page for the `ctf-calc` binary (feature `tui`)
//!
//! # Example
//!
//! ```rust
//! use ctf_calculator::prelude::*;
//!
//! let mut engine = Engine::new();
//! engine.press(Action::Digit(7));
//! engine.press(Action::SetOperator(Operator::Divide));
//! engine.press(Action::Digit(2));
//! assert_eq!(engine.press(Action::Evaluate).as_deref(), Some("3.5"));
//!
//! assert_eq!(SecretCode::decode(&SecretCode::composed()).as_deref(), Some(FLAG));
//! ```

// Allow common test patterns in this crate
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod config;
pub mod core;
pub mod driver;
pub mod flag;
pub mod logging;
pub mod shell;

#[cfg(feature = "tui")]
pub mod tui;

/// WASM module - always available for testing
/// (Mock DOM allows testing without actual browser bindings)
pub mod wasm;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::CalculatorConfig;
    pub use crate::core::{Action, CalcError, Engine, FlagField, Operator, SecretCode};
    pub use crate::driver::CalculatorDriver;
    pub use crate::flag::{CompletionStore, FileStore, FlagVerifier, MemoryStore, SubmitOutcome, FLAG};
    pub use crate::shell::{Page, Shell};

    #[cfg(feature = "tui")]
    pub use crate::driver::TuiDriver;

    pub use crate::wasm::{DomElement, DomEvent, MockDom, WasmDriver};
}

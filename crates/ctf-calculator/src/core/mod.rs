//! Calculator core: arithmetic state machine, number formatting and the
//! hidden flag triggers.
//!
//! Nothing in here touches a page. The engine talks to the outside world
//! through a single [`FlagField`] seam so it can be driven by the mock DOM,
//! the browser or the terminal front end alike.

pub mod engine;
pub mod format;
mod operations;
pub mod trigger;

pub use engine::{Action, CalculatorState, Engine};
pub use format::{format_number, format_whole, parse_entry, ERROR_MARKER};
pub use operations::Operator;
pub use trigger::{FlagField, SecretCode, TriggerOutcome};

use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Failures the engine can hit while interpreting an action.
///
/// Neither variant reaches the user as an error: a parse failure turns the
/// action into a silent no-op, and a division by zero puts the display into
/// the [`ERROR_MARKER`] state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// The current entry (or second operand) is not a finite number
    #[error("Invalid number: {0:?}")]
    ParseFailure(String),
    /// Division with a zero second operand
    #[error("Division by zero")]
    DivideByZero,
}

impl CalcError {
    /// Create a parse failure for the offending entry text
    #[must_use]
    pub fn parse_failure(entry: impl Into<String>) -> Self {
        Self::ParseFailure(entry.into())
    }

    /// Returns true if the engine should swallow this error without
    /// touching the display
    #[must_use]
    pub const fn is_silent(&self) -> bool {
        matches!(self, Self::ParseFailure(_))
    }
}

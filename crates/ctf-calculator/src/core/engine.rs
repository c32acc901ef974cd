//! Calculator engine: interprets keypad actions against a single owned
//! [`CalculatorState`] and composes the display line.
//!
//! The engine is a strict single-pending-operator machine, like a pocket
//! calculator: `2 + 3 * 4 =` evaluates to `12` because pressing `*` simply
//! replaces the pending `+` with `3` as its first operand.

use tracing::{debug, info, warn};

use crate::core::format::{format_number, format_whole, parse_entry, ERROR_MARKER};
use crate::core::trigger::{self, FlagField, SecretCode};
use crate::core::{CalcError, CalcResult, Operator};

/// A normalized user action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Digit key, `0..=9`
    Digit(u8),
    /// Decimal point
    Decimal,
    /// Reset to the baseline state (AC / Escape)
    Clear,
    /// Drop the last character of the entry
    Backspace,
    /// Divide the entry by 100
    Percent,
    /// Select the pending operator
    SetOperator(Operator),
    /// Apply the pending operator (= / Enter)
    Evaluate,
}

impl Action {
    /// Digit action for an ASCII digit character
    #[must_use]
    pub fn digit(ch: char) -> Option<Self> {
        ch.to_digit(10).map(|d| Self::Digit(d as u8))
    }
}

/// Arithmetic state of one calculator session
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorState {
    current_entry: String,
    pending_operator: Option<Operator>,
    accumulator: f64,
    awaiting_new_entry: bool,
    last_computed_display: Option<String>,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self {
            current_entry: "0".to_string(),
            pending_operator: None,
            accumulator: 0.0,
            awaiting_new_entry: true,
            last_computed_display: None,
        }
    }
}

impl CalculatorState {
    /// Text being typed, or the last computed result
    #[must_use]
    pub fn current_entry(&self) -> &str {
        &self.current_entry
    }

    /// Operator waiting for its second operand
    #[must_use]
    pub fn pending_operator(&self) -> Option<Operator> {
        self.pending_operator
    }

    /// First operand captured when the operator was selected
    #[must_use]
    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    /// True when the next digit starts a fresh entry
    #[must_use]
    pub fn awaiting_new_entry(&self) -> bool {
        self.awaiting_new_entry
    }

    /// Pending one-shot display override
    #[must_use]
    pub fn last_computed_display(&self) -> Option<&str> {
        self.last_computed_display.as_deref()
    }

    /// True while the entry shows the division-by-zero marker
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.current_entry == ERROR_MARKER
    }

    fn reset_entry(&mut self) {
        self.current_entry = "0".to_string();
        self.awaiting_new_entry = true;
    }

    /// Error display; behaves like a cleared calculator for further entry
    fn enter_error(&mut self) {
        *self = Self::default();
        self.current_entry = ERROR_MARKER.to_string();
    }
}

/// Whether an interpreted action refreshed the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Refresh,
    Ignore,
}

/// The calculator engine
#[derive(Debug, Clone, Default)]
pub struct Engine {
    state: CalculatorState,
}

impl Engine {
    /// Creates an engine in the cleared baseline state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current arithmetic state
    #[must_use]
    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    /// Applies an action with no flag field attached
    pub fn press(&mut self, action: Action) -> Option<String> {
        self.apply(action, &mut None::<String>)
    }

    /// Applies an action.
    ///
    /// Returns the refreshed display text, or `None` when the action was
    /// silently ignored (unparseable entry, `=` with nothing pending) and the
    /// display should stay as it is.
    pub fn apply(&mut self, action: Action, field: &mut dyn FlagField) -> Option<String> {
        match self.step(action, field) {
            Ok(Step::Refresh) => Some(self.render()),
            Ok(Step::Ignore) => None,
            Err(err) if err.is_silent() => {
                debug!(?action, %err, "action ignored");
                None
            }
            Err(err) => {
                warn!(?action, %err, "action failed");
                None
            }
        }
    }

    /// Composes the display line.
    ///
    /// A freshly computed result is shown once on its own; otherwise the
    /// line is the entry, or `first op [entry]` while an operator is pending.
    pub fn render(&mut self) -> String {
        if let Some(text) = self.state.last_computed_display.take() {
            return text;
        }
        match self.state.pending_operator {
            None => self.state.current_entry.clone(),
            Some(op) if self.state.awaiting_new_entry => {
                format!("{} {}", format_whole(self.state.accumulator), op.glyph())
            }
            Some(op) => format!(
                "{} {} {}",
                format_whole(self.state.accumulator),
                op.glyph(),
                self.state.current_entry
            ),
        }
    }

    fn step(&mut self, action: Action, field: &mut dyn FlagField) -> CalcResult<Step> {
        match action {
            Action::Clear => {
                self.state = CalculatorState::default();
                Ok(Step::Refresh)
            }
            Action::Backspace => {
                self.backspace();
                Ok(Step::Refresh)
            }
            Action::Percent => self.percent(),
            Action::Digit(d) => {
                let ch = char::from_digit(u32::from(d), 10)
                    .ok_or_else(|| CalcError::parse_failure(d.to_string()))?;
                self.append(ch);
                Ok(Step::Refresh)
            }
            Action::Decimal => Ok(self.decimal()),
            Action::SetOperator(op) => self.set_operator(op),
            Action::Evaluate => self.evaluate(field),
        }
    }

    fn backspace(&mut self) {
        if self.state.is_error() || self.state.current_entry.len() <= 1 {
            self.state.reset_entry();
        } else {
            self.state.current_entry.pop();
        }
    }

    fn percent(&mut self) -> CalcResult<Step> {
        let value = parse_entry(&self.state.current_entry)?;
        self.state.current_entry = format_number(value / 100.0);
        Ok(Step::Refresh)
    }

    fn append(&mut self, ch: char) {
        if self.state.awaiting_new_entry {
            self.state.current_entry = ch.to_string();
            self.state.awaiting_new_entry = false;
        } else {
            self.state.current_entry.push(ch);
        }
    }

    fn decimal(&mut self) -> Step {
        // a fresh entry gets a leading zero so it always parses
        if self.state.awaiting_new_entry {
            self.state.current_entry = "0.".to_string();
            self.state.awaiting_new_entry = false;
            return Step::Refresh;
        }
        if self.state.current_entry.contains('.') {
            return Step::Ignore;
        }
        self.state.current_entry.push('.');
        Step::Refresh
    }

    fn set_operator(&mut self, op: Operator) -> CalcResult<Step> {
        self.state.accumulator = parse_entry(&self.state.current_entry)?;
        self.state.pending_operator = Some(op);
        self.state.awaiting_new_entry = true;
        Ok(Step::Refresh)
    }

    fn evaluate(&mut self, field: &mut dyn FlagField) -> CalcResult<Step> {
        let Some(op) = self.state.pending_operator else {
            return Ok(Step::Ignore);
        };
        let second = parse_entry(&self.state.current_entry)?;
        let first = self.state.accumulator;

        match (op, op.apply(first, second)) {
            // Triggers leave the pending operator in place and redraw the
            // expression rather than a result.
            (Operator::Add, _) if SecretCode::is_addition_trigger(first, second) => {
                let outcome = trigger::reveal_first_fragment(field);
                info!(?outcome, "addition trigger");
            }
            (Operator::Multiply, Ok(product)) if SecretCode::is_product_trigger(product) => {
                let outcome = trigger::complete_code(field);
                info!(?outcome, "product trigger");
            }
            (_, Ok(result)) => {
                let text = format_number(result);
                debug!(first, second, %op, result = %text, "evaluated");
                self.state.current_entry.clone_from(&text);
                self.state.last_computed_display = Some(text);
                self.state.pending_operator = None;
                self.state.awaiting_new_entry = true;
            }
            (_, Err(CalcError::DivideByZero)) => {
                warn!(first, "division by zero");
                self.state.enter_error();
            }
            (_, Err(err)) => return Err(err),
        }
        Ok(Step::Refresh)
    }
}

//! The four binary operators of the keypad

use crate::core::{CalcError, CalcResult};

/// Operator waiting for its second operand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (*)
    Multiply,
    /// Division (/)
    Divide,
}

impl Operator {
    /// All operators in keypad order (top to bottom)
    pub const ALL: [Self; 4] = [Self::Divide, Self::Multiply, Self::Subtract, Self::Add];

    /// Returns the ASCII symbol used on the keyboard
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }

    /// Returns the glyph shown on the display and on the keypad
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "×",
            Self::Divide => "÷",
        }
    }

    /// Parses a keyboard symbol
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' | 'x' | 'X' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            _ => None,
        }
    }

    /// Element-id friendly name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Add => "plus",
            Self::Subtract => "minus",
            Self::Multiply => "times",
            Self::Divide => "divide",
        }
    }

    /// Applies the operator to `first` and `second`.
    ///
    /// Results are plain IEEE-754 arithmetic; overflow to infinity is not an
    /// error here. The only failure is an exact zero divisor.
    pub fn apply(self, first: f64, second: f64) -> CalcResult<f64> {
        match self {
            Self::Add => Ok(first + second),
            Self::Subtract => Ok(first - second),
            Self::Multiply => Ok(first * second),
            Self::Divide => {
                if second == 0.0 {
                    return Err(CalcError::DivideByZero);
                }
                Ok(first / second)
            }
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.glyph())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== Symbol tests =====

    #[test]
    fn test_symbols() {
        assert_eq!(Operator::Add.symbol(), '+');
        assert_eq!(Operator::Subtract.symbol(), '-');
        assert_eq!(Operator::Multiply.symbol(), '*');
        assert_eq!(Operator::Divide.symbol(), '/');
    }

    #[test]
    fn test_glyphs() {
        assert_eq!(Operator::Add.glyph(), "+");
        assert_eq!(Operator::Subtract.glyph(), "-");
        assert_eq!(Operator::Multiply.glyph(), "×");
        assert_eq!(Operator::Divide.glyph(), "÷");
    }

    #[test]
    fn test_from_symbol_round_trips() {
        for op in Operator::ALL {
            assert_eq!(Operator::from_symbol(op.symbol()), Some(op));
        }
    }

    #[test]
    fn test_from_symbol_multiply_aliases() {
        assert_eq!(Operator::from_symbol('x'), Some(Operator::Multiply));
        assert_eq!(Operator::from_symbol('X'), Some(Operator::Multiply));
        assert_eq!(Operator::from_symbol('^'), None);
    }

    #[test]
    fn test_display_uses_glyph() {
        assert_eq!(Operator::Divide.to_string(), "÷");
    }

    // ===== Apply tests =====

    #[test]
    fn test_apply_arithmetic() {
        assert_eq!(Operator::Add.apply(2.0, 3.0), Ok(5.0));
        assert_eq!(Operator::Subtract.apply(2.0, 3.0), Ok(-1.0));
        assert_eq!(Operator::Multiply.apply(6.0, 7.0), Ok(42.0));
        assert_eq!(Operator::Divide.apply(20.0, 4.0), Ok(5.0));
    }

    #[test]
    fn test_apply_divide_by_zero() {
        assert_eq!(
            Operator::Divide.apply(1.0, 0.0),
            Err(CalcError::DivideByZero)
        );
        assert_eq!(
            Operator::Divide.apply(0.0, -0.0),
            Err(CalcError::DivideByZero)
        );
    }

    #[test]
    fn test_apply_overflow_is_not_an_error() {
        let result = Operator::Multiply.apply(f64::MAX, 2.0).unwrap();
        assert!(result.is_infinite());
    }
}

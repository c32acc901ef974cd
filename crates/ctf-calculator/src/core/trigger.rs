//! Hidden flag triggers
//!
//! Two exact-operand conditions inside addition and multiplication write
//! fragments of a secret code into the page's flag input instead of
//! producing a result. Glued together the fragments are the base64 form of
//! the flag the verifier accepts.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tracing::{debug, info};

/// Settable text field holding the current flag candidate.
///
/// `flag_value` is `None` when the page has no flag input (for instance
/// once the challenge is completed and the form was never mounted). Writes
/// to a missing field are dropped.
pub trait FlagField {
    /// Current text of the flag input
    fn flag_value(&self) -> Option<String>;

    /// Replaces the text of the flag input
    fn set_flag_value(&mut self, value: &str);
}

impl FlagField for Option<String> {
    fn flag_value(&self) -> Option<String> {
        self.clone()
    }

    fn set_flag_value(&mut self, value: &str) {
        if let Some(text) = self {
            value.clone_into(text);
        }
    }
}

/// The secret code and the operand values that reveal it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecretCode;

impl SecretCode {
    /// Written by `1337 + 1337`
    pub const FIRST_FRAGMENT: &'static str = "Q1RGe000dGhf";
    /// Appended by a product of `1787569` when the first fragment is present
    pub const SECOND_FRAGMENT: &'static str = "MXNfRnVOfQ==";
    /// Written by a product of `1787569` when the first fragment is missing
    pub const INVALID_MARKER: &'static str = "WTF???";
    /// Both addition operands must equal this exactly
    pub const ADDEND: f64 = 1337.0;
    /// The multiplication result must equal this exactly
    pub const PRODUCT: f64 = 1_787_569.0;

    /// Both fragments in order
    #[must_use]
    pub fn composed() -> String {
        format!("{}{}", Self::FIRST_FRAGMENT, Self::SECOND_FRAGMENT)
    }

    /// Decodes a composed code into the plain flag text
    #[must_use]
    pub fn decode(code: &str) -> Option<String> {
        let bytes = STANDARD.decode(code).ok()?;
        String::from_utf8(bytes).ok()
    }

    /// True when an addition of these operands fires the first trigger
    #[must_use]
    pub fn is_addition_trigger(first: f64, second: f64) -> bool {
        first == Self::ADDEND && second == Self::ADDEND
    }

    /// True when a multiplication result fires the second trigger
    #[must_use]
    pub fn is_product_trigger(result: f64) -> bool {
        result == Self::PRODUCT
    }
}

/// What a trigger did to the flag field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// First fragment written
    Revealed,
    /// Second fragment appended, the field now holds the full code
    Completed,
    /// The field did not hold the first fragment and was overwritten
    Rejected,
    /// The page has no flag input
    FieldMissing,
}

/// Writes the first fragment into the flag field
pub fn reveal_first_fragment(field: &mut dyn FlagField) -> TriggerOutcome {
    if field.flag_value().is_none() {
        debug!("addition trigger fired without a flag field");
        return TriggerOutcome::FieldMissing;
    }
    field.set_flag_value(SecretCode::FIRST_FRAGMENT);
    info!("first code fragment revealed");
    TriggerOutcome::Revealed
}

/// Appends the second fragment, or marks the field invalid when the first
/// fragment is not exactly what the field holds
pub fn complete_code(field: &mut dyn FlagField) -> TriggerOutcome {
    let Some(current) = field.flag_value() else {
        debug!("product trigger fired without a flag field");
        return TriggerOutcome::FieldMissing;
    };
    if current == SecretCode::FIRST_FRAGMENT {
        field.set_flag_value(&format!("{current}{}", SecretCode::SECOND_FRAGMENT));
        info!("secret code completed");
        TriggerOutcome::Completed
    } else {
        field.set_flag_value(SecretCode::INVALID_MARKER);
        info!(previous = %current, "product trigger out of order");
        TriggerOutcome::Rejected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== SecretCode tests =====

    #[test]
    fn test_composed_code() {
        assert_eq!(SecretCode::composed(), "Q1RGe000dGhfMXNfRnVOfQ==");
    }

    #[test]
    fn test_composed_code_decodes_to_flag() {
        assert_eq!(
            SecretCode::decode(&SecretCode::composed()).as_deref(),
            Some("CTF{M4th_1s_FuN}")
        );
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert_eq!(SecretCode::decode(SecretCode::INVALID_MARKER), None);
    }

    #[test]
    fn test_trigger_conditions_are_exact() {
        assert!(SecretCode::is_addition_trigger(1337.0, 1337.0));
        assert!(!SecretCode::is_addition_trigger(1337.0, 1337.5));
        assert!(!SecretCode::is_addition_trigger(1336.0, 1338.0));
        assert!(SecretCode::is_product_trigger(1337.0 * 1337.0));
        assert!(!SecretCode::is_product_trigger(1_787_568.0));
    }

    // ===== FlagField tests =====

    #[test]
    fn test_option_field_absent_ignores_writes() {
        let mut field: Option<String> = None;
        field.set_flag_value("x");
        assert_eq!(field.flag_value(), None);
    }

    #[test]
    fn test_option_field_present_accepts_writes() {
        let mut field = Some(String::new());
        field.set_flag_value("abc");
        assert_eq!(field.flag_value().as_deref(), Some("abc"));
    }

    // ===== Trigger tests =====

    #[test]
    fn test_reveal_first_fragment() {
        let mut field = Some("anything".to_string());
        assert_eq!(reveal_first_fragment(&mut field), TriggerOutcome::Revealed);
        assert_eq!(field.as_deref(), Some(SecretCode::FIRST_FRAGMENT));
    }

    #[test]
    fn test_complete_code_after_reveal() {
        let mut field = Some(String::new());
        reveal_first_fragment(&mut field);
        assert_eq!(complete_code(&mut field), TriggerOutcome::Completed);
        assert_eq!(field, Some(SecretCode::composed()));
    }

    #[test]
    fn test_complete_code_out_of_order() {
        let mut field = Some(String::new());
        assert_eq!(complete_code(&mut field), TriggerOutcome::Rejected);
        assert_eq!(field.as_deref(), Some(SecretCode::INVALID_MARKER));
    }

    #[test]
    fn test_complete_code_twice_rejects() {
        let mut field = Some(String::new());
        reveal_first_fragment(&mut field);
        complete_code(&mut field);
        assert_eq!(complete_code(&mut field), TriggerOutcome::Rejected);
        assert_eq!(field.as_deref(), Some(SecretCode::INVALID_MARKER));
    }

    #[test]
    fn test_triggers_without_field() {
        let mut field: Option<String> = None;
        assert_eq!(
            reveal_first_fragment(&mut field),
            TriggerOutcome::FieldMissing
        );
        assert_eq!(complete_code(&mut field), TriggerOutcome::FieldMissing);
    }
}

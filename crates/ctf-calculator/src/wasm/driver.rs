//! WASM Driver - Unified Testing Interface
//!
//! Runs the shell against the [`MockDom`], recording every simulated event
//! the way a browser would deliver it.

use std::time::Duration;

use super::dom::{DomEvent, MockDom};
use crate::config::CalculatorConfig;
use crate::core::FlagField;
use crate::driver::CalculatorDriver;
use crate::flag::{CompletionStore, MemoryStore, SubmitOutcome};
use crate::shell::Shell;

/// WASM Driver wrapping the shell and mock DOM
#[derive(Debug)]
pub struct WasmDriver {
    shell: Shell<MockDom, MemoryStore>,
}

impl Default for WasmDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl WasmDriver {
    /// Creates a driver over a fresh page that was never solved
    #[must_use]
    pub fn new() -> Self {
        Self::with_store(MemoryStore::new())
    }

    /// Creates a driver whose completion store starts in a given state
    #[must_use]
    pub fn with_store(store: MemoryStore) -> Self {
        Self::with_shell(Shell::new(MockDom::new(), store, CalculatorConfig::default()))
    }

    /// Wraps an existing shell and runs its setup
    #[must_use]
    pub fn with_shell(mut shell: Shell<MockDom, MemoryStore>) -> Self {
        shell.setup();
        Self { shell }
    }

    /// Returns a reference to the shell
    #[must_use]
    pub fn shell(&self) -> &Shell<MockDom, MemoryStore> {
        &self.shell
    }

    /// Returns a reference to the DOM
    #[must_use]
    pub fn dom(&self) -> &MockDom {
        self.shell.page()
    }

    /// Returns a mutable reference to the DOM
    pub fn dom_mut(&mut self) -> &mut MockDom {
        self.shell.page_mut()
    }

    /// Moves the page clock forward
    pub fn advance(&mut self, delta: Duration) {
        self.dom_mut().advance(delta);
    }
}

impl CalculatorDriver for WasmDriver {
    fn press_key(&mut self, key: &str) {
        self.dom_mut().dispatch_event(DomEvent::key_down(key));
        self.shell.key_down(key);
        self.dom_mut().dispatch_event(DomEvent::key_up(key));
        self.shell.key_up(key);
    }

    fn click_button(&mut self, element_id: &str) {
        self.dom_mut().dispatch_event(DomEvent::click(element_id));
        self.shell.click(element_id);
    }

    fn display(&self) -> String {
        self.dom().display_text().to_string()
    }

    fn flag_input(&self) -> Option<String> {
        self.dom().flag_value()
    }

    fn type_flag(&mut self, text: &str) {
        self.dom_mut().type_flag(text);
    }

    fn enable_submit(&mut self) {
        self.dom_mut().enable_submit();
    }

    fn submit_flag(&mut self) -> Option<SubmitOutcome> {
        self.dom_mut()
            .dispatch_event(DomEvent::click(crate::shell::style::SUBMIT_BUTTON_ID));
        self.shell.click_submit()
    }

    fn is_completed(&self) -> bool {
        self.shell.store().is_completed().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{
        run_full_specification, verify_basic_arithmetic, verify_editing, verify_error_handling,
        verify_secret_sequence, verify_single_pending_operator, verify_submission,
    };
    use crate::flag::FLAG;
    use crate::shell::style;
    use crate::shell::BodyState;

    // ===== Constructor tests =====

    #[test]
    fn test_wasm_driver_new() {
        let driver = WasmDriver::new();
        assert_eq!(driver.display(), "0");
        assert_eq!(driver.flag_input().as_deref(), Some(""));
        assert!(!driver.is_completed());
    }

    #[test]
    fn test_wasm_driver_default() {
        let driver = WasmDriver::default();
        assert_eq!(driver.display(), "0");
    }

    #[test]
    fn test_wasm_driver_completed_store() {
        let driver = WasmDriver::with_store(MemoryStore::completed());
        assert!(driver.is_completed());
        assert_eq!(driver.flag_input(), None);
        assert_eq!(
            driver.dom().message_text(),
            Some(style::ALREADY_COMPLETED_MESSAGE)
        );
    }

    #[test]
    fn test_wasm_driver_debug() {
        let driver = WasmDriver::new();
        let debug = format!("{driver:?}");
        assert!(debug.contains("WasmDriver"));
    }

    // ===== Event recording tests =====

    #[test]
    fn test_press_key_records_events() {
        let mut driver = WasmDriver::new();
        driver.press_key("7");
        assert_eq!(
            driver.dom().event_history(),
            [DomEvent::key_down("7"), DomEvent::key_up("7")]
        );
        assert!(!driver.dom().is_emphasized("btn-7"));
    }

    #[test]
    fn test_click_button_records_event() {
        let mut driver = WasmDriver::new();
        driver.click_button("btn-9");
        assert_eq!(driver.display(), "9");
        assert_eq!(driver.dom().event_history(), [DomEvent::click("btn-9")]);
    }

    #[test]
    fn test_clicks_and_keys_mix() {
        let mut driver = WasmDriver::new();
        driver.click_button("btn-1");
        driver.press_keys("2");
        driver.click_button("btn-plus");
        driver.press_keys("3");
        driver.click_button("btn-equals");
        assert_eq!(driver.display(), "15");
    }

    // ===== Flow tests =====

    #[test]
    fn test_solve_then_celebration_ends() {
        let mut driver = WasmDriver::new();
        driver.enable_submit();
        driver.type_flag(FLAG);
        assert_eq!(driver.submit_flag(), Some(SubmitOutcome::Solved));
        assert_eq!(driver.dom().body_state(), BodyState::Celebrating);
        driver.advance(Duration::from_secs(3));
        assert_eq!(driver.dom().body_state(), BodyState::Default);
    }

    #[test]
    fn test_share_after_solving() {
        let mut driver = WasmDriver::new();
        driver.enable_submit();
        driver.type_flag(FLAG);
        driver.submit_flag();
        driver.click_button(style::SHARE_BUTTON_ID);
        assert_eq!(driver.dom().opened_windows().len(), 1);
        assert!(driver.dom().opened_windows()[0].ends_with(MockDom::DEFAULT_LOCATION));
    }

    // ===== Unified Specification Tests =====

    #[test]
    fn test_unified_basic_arithmetic() {
        verify_basic_arithmetic(&mut WasmDriver::new());
    }

    #[test]
    fn test_unified_single_pending_operator() {
        verify_single_pending_operator(&mut WasmDriver::new());
    }

    #[test]
    fn test_unified_editing() {
        verify_editing(&mut WasmDriver::new());
    }

    #[test]
    fn test_unified_error_handling() {
        verify_error_handling(&mut WasmDriver::new());
    }

    #[test]
    fn test_unified_secret_sequence() {
        verify_secret_sequence(&mut WasmDriver::new());
    }

    #[test]
    fn test_unified_submission() {
        verify_submission(&mut WasmDriver::new());
    }

    #[test]
    fn test_full_specification() {
        run_full_specification(&mut WasmDriver::new());
    }
}

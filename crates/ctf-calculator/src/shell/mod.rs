//! Presentation shell
//!
//! The shell turns clicks and key presses into engine actions, mirrors the
//! engine's display line onto a [`Page`], and runs the flag submission flow.
//! A page is anything that can show the calculator: the in-memory
//! [`MockDom`](crate::wasm::MockDom), the browser document, or a terminal.

pub mod keypad;
pub mod style;

use std::time::Duration;

use tracing::{debug, info};

use crate::config::CalculatorConfig;
use crate::core::{Action, Engine, FlagField};
use crate::flag::{completion_state, CompletionStore, FlagVerifier, SubmitOutcome};
use keypad::Keypad;

/// Tone of the result message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// Green, bold
    Success,
    /// Red
    Error,
}

impl MessageKind {
    /// Class string for the message element
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Success => style::SUCCESS_MESSAGE_CLASS,
            Self::Error => style::ERROR_MESSAGE_CLASS,
        }
    }
}

/// Whole-page visual state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyState {
    /// Black background
    #[default]
    Default,
    /// Gradient shown right after solving
    Celebrating,
}

impl BodyState {
    /// Class string for the body element
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Default => style::BODY_DEFAULT_CLASS,
            Self::Celebrating => style::BODY_SUCCESS_CLASS,
        }
    }
}

/// Fire-and-forget work a page runs after a delay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredTask {
    /// Put the body back into [`BodyState::Default`]
    RevertBody,
}

/// Everything the shell needs from a rendering surface.
///
/// The flag input is reached through the [`FlagField`] supertrait so the
/// engine's triggers can write into it directly.
pub trait Page: FlagField {
    /// Builds the keypad and the (empty) result message element
    fn mount(&mut self, keypad: &Keypad);

    /// Builds the flag input and the submit button; the button starts
    /// disabled
    fn mount_submit_form(&mut self);

    /// Whether clicks on the submit button go through
    fn submit_enabled(&self) -> bool;

    /// Hides the submission form
    fn hide_submit_form(&mut self);

    /// Restores the flag input's default class
    fn reset_flag_input_style(&mut self);

    /// Replaces the display text
    fn set_display(&mut self, text: &str);

    /// Shows a result message
    fn show_message(&mut self, text: &str, kind: MessageKind);

    /// Adds the share affordance
    fn show_share(&mut self);

    /// Opens the share link
    fn open_share(&mut self, url: &str);

    /// URL of the page being shared
    fn location(&self) -> String;

    /// Sets the whole-page visual state
    fn set_body(&mut self, state: BodyState);

    /// Adds or removes the keyboard emphasis on a keypad button
    fn set_emphasis(&mut self, button_id: &str, on: bool);

    /// Runs `task` after `delay`; there is no cancellation
    fn defer(&mut self, delay: Duration, task: DeferredTask);
}

/// Calculator shell over a page and a completion store
#[derive(Debug)]
pub struct Shell<P, S> {
    engine: Engine,
    keypad: Keypad,
    verifier: FlagVerifier,
    config: CalculatorConfig,
    page: P,
    store: S,
}

impl<P: Page, S: CompletionStore> Shell<P, S> {
    /// Creates a shell; call [`Shell::setup`] before forwarding events
    #[must_use]
    pub fn new(page: P, store: S, config: CalculatorConfig) -> Self {
        Self {
            engine: Engine::new(),
            keypad: Keypad::new(),
            verifier: FlagVerifier::new(),
            config,
            page,
            store,
        }
    }

    /// Mounts the keypad, shows the baseline display and either the
    /// submission form or the "already completed" state
    pub fn setup(&mut self) {
        self.page.mount(&self.keypad);
        self.dispatch(Action::Clear);

        if completion_state(&self.store) {
            debug!("challenge already completed");
            self.page
                .show_message(style::ALREADY_COMPLETED_MESSAGE, MessageKind::Success);
            self.page.show_share();
        } else {
            self.page.mount_submit_form();
        }
    }

    /// Applies an action and mirrors the refreshed display onto the page
    pub fn dispatch(&mut self, action: Action) -> Option<String> {
        let display = self.engine.apply(action, &mut self.page)?;
        self.page.set_display(&display);
        Some(display)
    }

    /// Handles a click on an element.
    ///
    /// Keypad buttons return the refreshed display; the submit and share
    /// buttons are handled here too and return `None`.
    pub fn click(&mut self, element_id: &str) -> Option<String> {
        match element_id {
            style::SUBMIT_BUTTON_ID => {
                self.click_submit();
                None
            }
            style::SHARE_BUTTON_ID => {
                self.share();
                None
            }
            _ => {
                let action = self.keypad.handle_click(element_id)?;
                self.dispatch(action)
            }
        }
    }

    /// Handles a keydown; unmapped keys are ignored
    pub fn key_down(&mut self, key: &str) -> Option<String> {
        let action = Keypad::key_to_action(key)?;
        if let Some(id) = self.keypad.key_to_button_id(key) {
            self.page.set_emphasis(id, true);
        }
        self.dispatch(action)
    }

    /// Handles a keyup: only releases the button emphasis
    pub fn key_up(&mut self, key: &str) {
        if let Some(id) = self.keypad.key_to_button_id(key) {
            self.page.set_emphasis(id, false);
        }
    }

    /// Click on the submit button; dropped while the button is disabled
    pub fn click_submit(&mut self) -> Option<SubmitOutcome> {
        if !self.page.submit_enabled() {
            debug!("click on disabled submit button dropped");
            return None;
        }
        Some(self.submit())
    }

    /// Verifies the flag input's current text
    pub fn submit(&mut self) -> SubmitOutcome {
        let candidate = self.page.flag_value().unwrap_or_default();
        let outcome = self.verifier.submit(&candidate, &mut self.store);
        match outcome {
            SubmitOutcome::Solved => {
                self.page
                    .show_message(style::SOLVED_MESSAGE, MessageKind::Success);
                self.page.hide_submit_form();
                self.page.show_share();
                self.page.set_body(BodyState::Celebrating);
                self.page
                    .defer(self.config.celebration(), DeferredTask::RevertBody);
            }
            SubmitOutcome::AlreadyCompleted => {}
            SubmitOutcome::Incorrect => {
                self.page
                    .show_message(style::INCORRECT_MESSAGE, MessageKind::Error);
                self.page.reset_flag_input_style();
            }
        }
        outcome
    }

    /// Opens the share link for the current page
    pub fn share(&mut self) {
        let url = self.share_url();
        info!(%url, "opening share link");
        self.page.open_share(&url);
    }

    /// Share link for the current page
    #[must_use]
    pub fn share_url(&self) -> String {
        self.config.share_url(&self.page.location())
    }

    /// The calculator engine
    #[must_use]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// The keypad definition
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// The page
    #[must_use]
    pub fn page(&self) -> &P {
        &self.page
    }

    /// The page, mutably (e.g. to type into the flag input)
    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    /// The completion store
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Shell settings
    #[must_use]
    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }
}

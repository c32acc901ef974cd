//! TUI Application State
//!
//! [`TerminalPage`] is the terminal's version of the calculator page: the
//! same elements the browser shows, kept as plain state for the renderer.
//! [`TerminalApp`] owns the shell and turns [`KeyAction`]s into shell calls.

use std::time::{Duration, Instant};

use tracing::debug;

use super::input::{parse_key_script, KeyAction};
use crate::config::CalculatorConfig;
use crate::core::FlagField;
use crate::flag::{CompletionStore, SubmitOutcome};
use crate::shell::keypad::Keypad;
use crate::shell::style;
use crate::shell::{BodyState, DeferredTask, MessageKind, Page, Shell};

/// Which part of the page receives typed characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Keys drive the calculator
    #[default]
    Keypad,
    /// Keys edit the flag input
    FlagInput,
}

/// Flag input plus submit button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitForm {
    /// Flag input text
    pub input: String,
    /// Whether the submit button accepts presses
    pub enabled: bool,
    /// Whether the form is shown
    pub visible: bool,
}

/// Calculator page drawn in the terminal
#[derive(Debug)]
pub struct TerminalPage {
    keypad: Option<Keypad>,
    display: String,
    message: Option<(String, MessageKind)>,
    form: Option<SubmitForm>,
    share: bool,
    shared: Vec<String>,
    body: BodyState,
    emphasized: Vec<String>,
    deferred: Vec<(Instant, DeferredTask)>,
    location: String,
    focus: Focus,
}

impl TerminalPage {
    /// Creates an empty page; `location` is the URL the share link points at
    #[must_use]
    pub fn new(location: &str) -> Self {
        Self {
            keypad: None,
            display: String::new(),
            message: None,
            form: None,
            share: false,
            shared: Vec::new(),
            body: BodyState::Default,
            emphasized: Vec::new(),
            deferred: Vec::new(),
            location: location.to_string(),
            focus: Focus::Keypad,
        }
    }

    /// The mounted keypad
    #[must_use]
    pub fn keypad(&self) -> Option<&Keypad> {
        self.keypad.as_ref()
    }

    /// Display text
    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Result message and its tone
    #[must_use]
    pub fn message(&self) -> Option<(&str, MessageKind)> {
        self.message.as_ref().map(|(text, kind)| (text.as_str(), *kind))
    }

    /// The submission form, if mounted
    #[must_use]
    pub fn form(&self) -> Option<&SubmitForm> {
        self.form.as_ref()
    }

    /// Whether the share affordance is shown
    #[must_use]
    pub fn has_share(&self) -> bool {
        self.share
    }

    /// Share links produced so far, newest last
    #[must_use]
    pub fn shared_links(&self) -> &[String] {
        &self.shared
    }

    /// Page visual state
    #[must_use]
    pub fn body(&self) -> BodyState {
        self.body
    }

    /// Whether a keypad button is drawn pressed
    #[must_use]
    pub fn is_emphasized(&self, button_id: &str) -> bool {
        self.emphasized.iter().any(|id| id == button_id)
    }

    /// Current input focus
    #[must_use]
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Switches focus between the keypad and a visible flag input
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Keypad if self.form.as_ref().is_some_and(|f| f.visible) => Focus::FlagInput,
            _ => Focus::Keypad,
        };
    }

    /// Appends a character to the flag input
    pub fn push_flag_char(&mut self, ch: char) {
        if let Some(form) = self.form.as_mut() {
            form.input.push(ch);
        }
    }

    /// Removes the last character of the flag input
    pub fn pop_flag_char(&mut self) {
        if let Some(form) = self.form.as_mut() {
            form.input.pop();
        }
    }

    /// Enables the submit button
    pub fn enable_submit(&mut self) {
        if let Some(form) = self.form.as_mut() {
            form.enabled = true;
        }
    }

    /// Number of deferred tasks not yet run
    #[must_use]
    pub fn pending_tasks(&self) -> usize {
        self.deferred.len()
    }

    /// Runs every deferred task due at `now`, in the order they fall due
    pub fn poll_deferred(&mut self, now: Instant) {
        let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.deferred)
            .into_iter()
            .partition(|(at, _)| *at <= now);
        self.deferred = pending;
        due.sort_by_key(|(at, _)| *at);
        for (_, task) in due {
            match task {
                DeferredTask::RevertBody => self.body = BodyState::Default,
            }
        }
    }
}

impl FlagField for TerminalPage {
    fn flag_value(&self) -> Option<String> {
        self.form.as_ref().map(|f| f.input.clone())
    }

    fn set_flag_value(&mut self, value: &str) {
        if let Some(form) = self.form.as_mut() {
            form.input = value.to_string();
        }
    }
}

impl Page for TerminalPage {
    fn mount(&mut self, keypad: &Keypad) {
        self.keypad = Some(keypad.clone());
    }

    fn mount_submit_form(&mut self) {
        self.form = Some(SubmitForm {
            input: String::new(),
            enabled: false,
            visible: true,
        });
    }

    fn submit_enabled(&self) -> bool {
        self.form.as_ref().is_some_and(|f| f.visible && f.enabled)
    }

    fn hide_submit_form(&mut self) {
        if let Some(form) = self.form.as_mut() {
            form.visible = false;
        }
        self.focus = Focus::Keypad;
    }

    fn reset_flag_input_style(&mut self) {}

    fn set_display(&mut self, text: &str) {
        self.display = text.to_string();
    }

    fn show_message(&mut self, text: &str, kind: MessageKind) {
        self.message = Some((text.to_string(), kind));
    }

    fn show_share(&mut self) {
        self.share = true;
    }

    fn open_share(&mut self, url: &str) {
        self.shared.push(url.to_string());
    }

    fn location(&self) -> String {
        self.location.clone()
    }

    fn set_body(&mut self, state: BodyState) {
        self.body = state;
    }

    fn set_emphasis(&mut self, button_id: &str, on: bool) {
        self.emphasized.retain(|id| id != button_id);
        if on {
            self.emphasized.push(button_id.to_string());
        }
    }

    fn defer(&mut self, delay: Duration, task: DeferredTask) {
        self.deferred.push((Instant::now() + delay, task));
    }
}

/// Terminal calculator application
#[derive(Debug)]
pub struct TerminalApp<S> {
    shell: Shell<TerminalPage, S>,
    held_key: Option<String>,
    should_quit: bool,
}

impl<S: CompletionStore> TerminalApp<S> {
    /// Builds the page and runs the shell setup
    #[must_use]
    pub fn new(store: S, config: CalculatorConfig) -> Self {
        let page = TerminalPage::new(&config.page_url);
        let mut shell = Shell::new(page, store, config);
        shell.setup();
        Self {
            shell,
            held_key: None,
            should_quit: false,
        }
    }

    /// The shell
    #[must_use]
    pub fn shell(&self) -> &Shell<TerminalPage, S> {
        &self.shell
    }

    /// The page
    #[must_use]
    pub fn page(&self) -> &TerminalPage {
        self.shell.page()
    }

    /// The page, mutably
    pub fn page_mut(&mut self) -> &mut TerminalPage {
        self.shell.page_mut()
    }

    /// Returns whether the app should quit
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Presses a key.
    ///
    /// Terminals report no key releases, so the previous key is released
    /// first and the new one stays drawn pressed until the next key.
    pub fn press_key(&mut self, key: &str) {
        if let Some(held) = self.held_key.take() {
            self.shell.key_up(&held);
        }
        self.shell.key_down(key);
        self.held_key = Some(key.to_string());
    }

    /// Releases the held key, if any
    pub fn release_key(&mut self) {
        if let Some(held) = self.held_key.take() {
            self.shell.key_up(&held);
        }
    }

    /// Clicks a keypad button or page control by element id
    pub fn click(&mut self, element_id: &str) {
        self.shell.click(element_id);
    }

    /// Presses the submit button
    pub fn submit(&mut self) -> Option<SubmitOutcome> {
        self.shell.click_submit()
    }

    /// Presses the share button, when it is shown
    pub fn share(&mut self) {
        if self.page().has_share() {
            self.shell.click(style::SHARE_BUTTON_ID);
        }
    }

    /// Runs deferred page work that is due
    pub fn tick(&mut self, now: Instant) {
        self.page_mut().poll_deferred(now);
    }

    /// Applies one input action
    pub fn handle(&mut self, action: KeyAction) {
        match action {
            KeyAction::Key(key) => self.press_key(&key),
            KeyAction::ToggleFocus => self.page_mut().toggle_focus(),
            KeyAction::TypeChar(ch) => self.page_mut().push_flag_char(ch),
            KeyAction::EraseChar => self.page_mut().pop_flag_char(),
            KeyAction::Submit => {
                let outcome = self.submit();
                debug!(?outcome, "submit pressed");
            }
            KeyAction::EnableSubmit => self.page_mut().enable_submit(),
            KeyAction::Share => self.share(),
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }
    }

    /// Presses every key of a script (see [`parse_key_script`]) and
    /// releases the last one
    pub fn replay(&mut self, script: &str) {
        for key in parse_key_script(script) {
            self.press_key(&key);
        }
        self.release_key();
    }
}

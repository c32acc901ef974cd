//! Mock DOM for testing the shell without a browser
//!
//! Elements live in an id-keyed registry; parents keep the ids of their
//! children in insertion order. Deferred tasks run against a virtual clock
//! that only moves through [`MockDom::advance`].

use std::collections::HashMap;
use std::time::Duration;

use crate::core::FlagField;
use crate::shell::keypad::Keypad;
use crate::shell::style;
use crate::shell::{BodyState, DeferredTask, MessageKind, Page};

/// Represents a DOM element for testing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomElement {
    /// Element ID
    pub id: String,
    /// Element tag name
    pub tag: String,
    /// Text content
    pub text_content: String,
    /// Element attributes
    pub attributes: HashMap<String, String>,
    /// CSS classes
    pub classes: Vec<String>,
    /// Whether element is visible
    pub visible: bool,
    /// IDs of child elements, in insertion order
    pub children: Vec<String>,
}

impl Default for DomElement {
    fn default() -> Self {
        Self::new("div")
    }
}

impl DomElement {
    /// Creates a new DOM element with the given tag
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            id: String::new(),
            tag: tag.to_string(),
            text_content: String::new(),
            attributes: HashMap::new(),
            classes: Vec::new(),
            visible: true,
            children: Vec::new(),
        }
    }

    /// Creates an element with an ID
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    /// Sets the text content
    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.text_content = text.to_string();
        self
    }

    /// Sets the whole class attribute
    #[must_use]
    pub fn with_class_name(mut self, class_name: &str) -> Self {
        self.set_class_name(class_name);
        self
    }

    /// Sets an attribute
    #[must_use]
    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    /// Sets visibility
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Sets text content
    pub fn set_text(&mut self, text: &str) {
        self.text_content = text.to_string();
    }

    /// Replaces all classes with the whitespace-separated `class_name`
    pub fn set_class_name(&mut self, class_name: &str) {
        self.classes = class_name.split_whitespace().map(str::to_string).collect();
    }

    /// The class attribute as one string
    #[must_use]
    pub fn class_name(&self) -> String {
        self.classes.join(" ")
    }

    /// Adds a class
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    /// Removes a class
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Checks if element has a class
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Sets an attribute
    pub fn set_attr(&mut self, key: &str, value: &str) {
        self.attributes.insert(key.to_string(), value.to_string());
    }

    /// Removes an attribute
    pub fn remove_attr(&mut self, key: &str) {
        self.attributes.remove(key);
    }

    /// Gets an attribute value
    #[must_use]
    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

/// DOM events that can be dispatched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    /// Click event on an element
    Click {
        /// The ID of the clicked element
        element_id: String,
    },
    /// Input event with new value
    Input {
        /// The ID of the input element
        element_id: String,
        /// The new value entered
        value: String,
    },
    /// Key pressed
    KeyDown {
        /// The `key` value of the event
        key: String,
    },
    /// Key released
    KeyUp {
        /// The `key` value of the event
        key: String,
    },
}

impl DomEvent {
    /// Creates a click event
    #[must_use]
    pub fn click(element_id: &str) -> Self {
        Self::Click {
            element_id: element_id.to_string(),
        }
    }

    /// Creates an input event
    #[must_use]
    pub fn input(element_id: &str, value: &str) -> Self {
        Self::Input {
            element_id: element_id.to_string(),
            value: value.to_string(),
        }
    }

    /// Creates a keydown event
    #[must_use]
    pub fn key_down(key: &str) -> Self {
        Self::KeyDown {
            key: key.to_string(),
        }
    }

    /// Creates a keyup event
    #[must_use]
    pub fn key_up(key: &str) -> Self {
        Self::KeyUp {
            key: key.to_string(),
        }
    }
}

/// In-memory page for the calculator
#[derive(Debug)]
pub struct MockDom {
    elements: HashMap<String, DomElement>,
    event_history: Vec<DomEvent>,
    location: String,
    now: Duration,
    deferred: Vec<(Duration, DeferredTask)>,
    opened_windows: Vec<String>,
}

impl Default for MockDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDom {
    /// Location used when none is given
    pub const DEFAULT_LOCATION: &'static str = "http://localhost:8080/";

    /// Creates the static page skeleton: body, display and keypad container
    #[must_use]
    pub fn new() -> Self {
        Self::with_location(Self::DEFAULT_LOCATION)
    }

    /// Creates a page served from `location`
    #[must_use]
    pub fn with_location(location: &str) -> Self {
        let mut dom = Self {
            elements: HashMap::new(),
            event_history: Vec::new(),
            location: location.to_string(),
            now: Duration::ZERO,
            deferred: Vec::new(),
            opened_windows: Vec::new(),
        };
        dom.register_element(
            DomElement::new("body")
                .with_id("body")
                .with_class_name(style::BODY_DEFAULT_CLASS),
        );
        dom.append_child("body", DomElement::new("div").with_id(style::DISPLAY_ID));
        dom.append_child("body", DomElement::new("div").with_id(style::KEYPAD_ID));
        dom
    }

    /// Registers an element for ID lookup
    pub fn register_element(&mut self, element: DomElement) {
        if !element.id.is_empty() {
            self.elements.insert(element.id.clone(), element);
        }
    }

    /// Gets an element by ID
    #[must_use]
    pub fn get_element(&self, id: &str) -> Option<&DomElement> {
        self.elements.get(id)
    }

    /// Gets a mutable element by ID
    pub fn get_element_mut(&mut self, id: &str) -> Option<&mut DomElement> {
        self.elements.get_mut(id)
    }

    /// Adds a child element to a parent
    pub fn append_child(&mut self, parent_id: &str, child: DomElement) {
        if child.id.is_empty() {
            return;
        }
        if let Some(parent) = self.elements.get_mut(parent_id) {
            parent.children.push(child.id.clone());
        }
        self.register_element(child);
    }

    /// Updates element text by ID
    pub fn set_element_text(&mut self, id: &str, text: &str) {
        if let Some(elem) = self.elements.get_mut(id) {
            elem.set_text(text);
        }
    }

    /// Gets element text by ID
    #[must_use]
    pub fn get_element_text(&self, id: &str) -> Option<&str> {
        self.elements.get(id).map(|e| e.text_content.as_str())
    }

    /// Records an event; input events also update the target's value
    pub fn dispatch_event(&mut self, event: DomEvent) {
        if let DomEvent::Input { element_id, value } = &event {
            if let Some(elem) = self.elements.get_mut(element_id) {
                elem.set_attr("value", value);
            }
        }
        self.event_history.push(event);
    }

    /// Gets the event history
    #[must_use]
    pub fn event_history(&self) -> &[DomEvent] {
        &self.event_history
    }

    /// Clears event history
    pub fn clear_event_history(&mut self) {
        self.event_history.clear();
    }

    /// Types into the flag input
    pub fn type_flag(&mut self, text: &str) {
        self.dispatch_event(DomEvent::input(style::FLAG_INPUT_ID, text));
    }

    /// Removes the submit button's `disabled` attribute, as a player would
    /// from the developer tools
    pub fn enable_submit(&mut self) {
        if let Some(button) = self.elements.get_mut(style::SUBMIT_BUTTON_ID) {
            button.remove_attr("disabled");
        }
    }

    /// Display text
    #[must_use]
    pub fn display_text(&self) -> &str {
        self.get_element_text(style::DISPLAY_ID).unwrap_or_default()
    }

    /// Result message text, if the element exists
    #[must_use]
    pub fn message_text(&self) -> Option<&str> {
        self.get_element_text(style::RESULT_MESSAGE_ID)
    }

    /// Whether the submission form exists and is shown
    #[must_use]
    pub fn submit_form_visible(&self) -> bool {
        self.get_element(style::SUBMIT_FORM_ID)
            .is_some_and(|form| form.visible)
    }

    /// Whether the share button was added
    #[must_use]
    pub fn has_share(&self) -> bool {
        self.get_element(style::SHARE_BUTTON_ID).is_some()
    }

    /// Whether a keypad button currently carries the keyboard emphasis
    #[must_use]
    pub fn is_emphasized(&self, button_id: &str) -> bool {
        self.get_element(button_id).is_some_and(|button| {
            style::EMPHASIS_CLASSES
                .iter()
                .all(|class| button.has_class(class))
        })
    }

    /// Body state derived from the body's class
    #[must_use]
    pub fn body_state(&self) -> BodyState {
        match self.get_element("body") {
            Some(body) if body.class_name() == style::BODY_SUCCESS_CLASS => BodyState::Celebrating,
            _ => BodyState::Default,
        }
    }

    /// Share links opened so far
    #[must_use]
    pub fn opened_windows(&self) -> &[String] {
        &self.opened_windows
    }

    /// Number of deferred tasks not yet run
    #[must_use]
    pub fn pending_tasks(&self) -> usize {
        self.deferred.len()
    }

    /// Moves the virtual clock forward and runs every task now due, in the
    /// order they fall due
    pub fn advance(&mut self, delta: Duration) {
        self.now += delta;
        let now = self.now;
        let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.deferred)
            .into_iter()
            .partition(|(at, _)| *at <= now);
        self.deferred = pending;
        due.sort_by_key(|(at, _)| *at);
        for (_, task) in due {
            self.run_task(task);
        }
    }

    fn run_task(&mut self, task: DeferredTask) {
        match task {
            DeferredTask::RevertBody => self.set_body(BodyState::Default),
        }
    }
}

impl FlagField for MockDom {
    fn flag_value(&self) -> Option<String> {
        self.get_element(style::FLAG_INPUT_ID)
            .map(|input| input.get_attr("value").unwrap_or_default().to_string())
    }

    fn set_flag_value(&mut self, value: &str) {
        if let Some(input) = self.elements.get_mut(style::FLAG_INPUT_ID) {
            input.set_attr("value", value);
        }
    }
}

impl Page for MockDom {
    fn mount(&mut self, keypad: &Keypad) {
        for btn in keypad.buttons() {
            let mut element = DomElement::new("button")
                .with_id(&btn.id)
                .with_text(&btn.label())
                .with_class_name(&btn.class_name());
            if let Some(span) = btn.grid_column() {
                element.set_attr("style", &format!("grid-column: {span}"));
            }
            self.append_child(style::KEYPAD_ID, element);
        }
        self.append_child(
            "body",
            DomElement::new("div")
                .with_id(style::RESULT_MESSAGE_ID)
                .with_class_name(style::RESULT_MESSAGE_CLASS),
        );
    }

    fn mount_submit_form(&mut self) {
        self.append_child(
            "body",
            DomElement::new("div")
                .with_id(style::SUBMIT_FORM_ID)
                .with_class_name(style::SUBMIT_FORM_CLASS),
        );
        self.append_child(
            style::SUBMIT_FORM_ID,
            DomElement::new("input")
                .with_id(style::FLAG_INPUT_ID)
                .with_class_name(style::INPUT_CLASS)
                .with_attr("type", "text")
                .with_attr("placeholder", style::FLAG_PLACEHOLDER)
                .with_attr("value", ""),
        );
        self.append_child(
            style::SUBMIT_FORM_ID,
            DomElement::new("button")
                .with_id(style::SUBMIT_BUTTON_ID)
                .with_text(style::SUBMIT_LABEL)
                .with_class_name(style::SUBMIT_BUTTON_CLASS)
                .with_attr("disabled", "true")
                .with_attr("data-hint", style::SUBMIT_HINT),
        );
    }

    fn submit_enabled(&self) -> bool {
        self.submit_form_visible()
            && self
                .get_element(style::SUBMIT_BUTTON_ID)
                .is_some_and(|button| button.get_attr("disabled").is_none())
    }

    fn hide_submit_form(&mut self) {
        if let Some(form) = self.elements.get_mut(style::SUBMIT_FORM_ID) {
            form.set_visible(false);
        }
    }

    fn reset_flag_input_style(&mut self) {
        if let Some(input) = self.elements.get_mut(style::FLAG_INPUT_ID) {
            input.set_class_name(style::INPUT_CLASS);
        }
    }

    fn set_display(&mut self, text: &str) {
        self.set_element_text(style::DISPLAY_ID, text);
    }

    fn show_message(&mut self, text: &str, kind: MessageKind) {
        if let Some(message) = self.elements.get_mut(style::RESULT_MESSAGE_ID) {
            message.set_text(text);
            message.set_class_name(kind.class());
        }
    }

    fn show_share(&mut self) {
        self.append_child(
            "body",
            DomElement::new("div")
                .with_id(style::SHARE_CONTAINER_ID)
                .with_class_name(style::SHARE_CONTAINER_CLASS),
        );
        self.append_child(
            style::SHARE_CONTAINER_ID,
            DomElement::new("button")
                .with_id(style::SHARE_BUTTON_ID)
                .with_text(style::SHARE_LABEL)
                .with_class_name(style::SHARE_BUTTON_CLASS),
        );
    }

    fn open_share(&mut self, url: &str) {
        self.opened_windows.push(url.to_string());
    }

    fn location(&self) -> String {
        self.location.clone()
    }

    fn set_body(&mut self, state: BodyState) {
        if let Some(body) = self.elements.get_mut("body") {
            body.set_class_name(state.class());
        }
    }

    fn set_emphasis(&mut self, button_id: &str, on: bool) {
        if let Some(button) = self.elements.get_mut(button_id) {
            for class in style::EMPHASIS_CLASSES {
                if on {
                    button.add_class(class);
                } else {
                    button.remove_class(class);
                }
            }
        }
    }

    fn defer(&mut self, delay: Duration, task: DeferredTask) {
        self.deferred.push((self.now + delay, task));
    }
}

//! Browser WASM bindings for the calculator
//!
//! [`BrowserPage`] draws the shell into the real document and
//! [`LocalStorageStore`] keeps the completion flag in `localStorage`.
//! [`start`] runs on module load and wires the document listeners.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    console, Document, Element, Event, EventTarget, HtmlButtonElement, HtmlInputElement,
    KeyboardEvent, Node, Storage, Window,
};

use crate::config::CalculatorConfig;
use crate::core::FlagField;
use crate::flag::{CompletionStore, StoreError, StoreResult};
use crate::shell::keypad::Keypad;
use crate::shell::style;
use crate::shell::{BodyState, DeferredTask, MessageKind, Page, Shell};

fn report(context: &str, err: &JsValue) {
    console::warn_2(&JsValue::from_str(context), err);
}

fn js_error(err: &JsValue) -> StoreError {
    StoreError::unavailable(format!("{err:?}"))
}

/// Completion flag kept under `ctf_completed` in `localStorage`
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    storage: Option<Storage>,
}

impl LocalStorageStore {
    /// Storage key
    pub const KEY: &'static str = "ctf_completed";

    /// Opens the window's local storage; a blocked storage makes every call
    /// fail with [`StoreError::Unavailable`]
    #[must_use]
    pub fn new(window: &Window) -> Self {
        Self {
            storage: window.local_storage().ok().flatten(),
        }
    }

    fn storage(&self) -> StoreResult<&Storage> {
        self.storage
            .as_ref()
            .ok_or_else(|| StoreError::unavailable("localStorage is not available"))
    }
}

impl CompletionStore for LocalStorageStore {
    fn is_completed(&self) -> StoreResult<bool> {
        let value = self.storage()?.get_item(Self::KEY).map_err(|e| js_error(&e))?;
        Ok(value.as_deref() == Some("true"))
    }

    fn mark_completed(&mut self) -> StoreResult<()> {
        self.storage()?
            .set_item(Self::KEY, "true")
            .map_err(|e| js_error(&e))
    }

    fn reset(&mut self) -> StoreResult<()> {
        self.storage()?
            .remove_item(Self::KEY)
            .map_err(|e| js_error(&e))
    }
}

/// The live document
#[derive(Debug, Clone)]
pub struct BrowserPage {
    window: Window,
    document: Document,
}

impl BrowserPage {
    /// Attaches to the global window and its document
    pub fn new() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("window has no document"))?;
        Ok(Self { window, document })
    }

    /// The global window
    #[must_use]
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// The document
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    fn element(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn create(&self, tag: &str, id: &str, class_name: &str) -> Option<Element> {
        match self.document.create_element(tag) {
            Ok(element) => {
                if !id.is_empty() {
                    element.set_id(id);
                }
                element.set_class_name(class_name);
                Some(element)
            }
            Err(err) => {
                report("createElement failed", &err);
                None
            }
        }
    }

    /// Parent of the element with `id`; new sections are added next to it
    fn parent_of(&self, id: &str) -> Option<Node> {
        self.element(id).and_then(|e| e.parent_node())
    }

    fn append(parent: &Node, child: &Element) {
        if let Err(err) = parent.append_child(child) {
            report("appendChild failed", &err);
        }
    }

    fn set_attr(element: &Element, name: &str, value: &str) {
        if let Err(err) = element.set_attribute(name, value) {
            report("setAttribute failed", &err);
        }
    }

    fn flag_input(&self) -> Option<HtmlInputElement> {
        self.element(style::FLAG_INPUT_ID)?
            .dyn_into::<HtmlInputElement>()
            .ok()
    }
}

fn run_task(document: &Document, task: DeferredTask) {
    match task {
        DeferredTask::RevertBody => {
            if let Some(body) = document.body() {
                body.set_class_name(BodyState::Default.class());
            }
        }
    }
}

impl FlagField for BrowserPage {
    fn flag_value(&self) -> Option<String> {
        self.flag_input().map(|input| input.value())
    }

    fn set_flag_value(&mut self, value: &str) {
        if let Some(input) = self.flag_input() {
            input.set_value(value);
        }
    }
}

impl Page for BrowserPage {
    fn mount(&mut self, keypad: &Keypad) {
        let Some(container) = self.element(style::KEYPAD_ID) else {
            console::warn_1(&JsValue::from_str("no #keypad element on the page"));
            return;
        };
        for btn in keypad.buttons() {
            let Some(button) = self.create("button", &btn.id, &btn.class_name()) else {
                continue;
            };
            button.set_text_content(Some(&btn.label()));
            if let Some(span) = btn.grid_column() {
                Self::set_attr(&button, "style", &format!("grid-column: {span}"));
            }
            Self::append(&container, &button);
        }

        if let (Some(parent), Some(message)) = (
            container.parent_node(),
            self.create("div", style::RESULT_MESSAGE_ID, style::RESULT_MESSAGE_CLASS),
        ) {
            Self::append(&parent, &message);
        }
    }

    fn mount_submit_form(&mut self) {
        let Some(parent) = self.parent_of(style::KEYPAD_ID) else {
            return;
        };
        let (Some(form), Some(input), Some(button)) = (
            self.create("div", style::SUBMIT_FORM_ID, style::SUBMIT_FORM_CLASS),
            self.create("input", style::FLAG_INPUT_ID, style::INPUT_CLASS),
            self.create("button", style::SUBMIT_BUTTON_ID, style::SUBMIT_BUTTON_CLASS),
        ) else {
            return;
        };

        Self::set_attr(&input, "type", "text");
        Self::set_attr(&input, "placeholder", style::FLAG_PLACEHOLDER);
        button.set_text_content(Some(style::SUBMIT_LABEL));
        Self::set_attr(&button, "disabled", "");
        Self::set_attr(&button, "data-hint", style::SUBMIT_HINT);

        Self::append(&form, &input);
        Self::append(&form, &button);
        Self::append(&parent, &form);
    }

    fn submit_enabled(&self) -> bool {
        let visible = self
            .element(style::SUBMIT_FORM_ID)
            .is_some_and(|form| form.get_attribute("style").as_deref() != Some("display: none"));
        visible
            && self
                .element(style::SUBMIT_BUTTON_ID)
                .and_then(|e| e.dyn_into::<HtmlButtonElement>().ok())
                .is_some_and(|button| !button.disabled())
    }

    fn hide_submit_form(&mut self) {
        if let Some(form) = self.element(style::SUBMIT_FORM_ID) {
            Self::set_attr(&form, "style", "display: none");
        }
    }

    fn reset_flag_input_style(&mut self) {
        if let Some(input) = self.element(style::FLAG_INPUT_ID) {
            input.set_class_name(style::INPUT_CLASS);
        }
    }

    fn set_display(&mut self, text: &str) {
        if let Some(display) = self.element(style::DISPLAY_ID) {
            display.set_text_content(Some(text));
        }
    }

    fn show_message(&mut self, text: &str, kind: MessageKind) {
        if let Some(message) = self.element(style::RESULT_MESSAGE_ID) {
            message.set_text_content(Some(text));
            message.set_class_name(kind.class());
        }
    }

    fn show_share(&mut self) {
        let Some(parent) = self.parent_of(style::RESULT_MESSAGE_ID) else {
            return;
        };
        let (Some(container), Some(button), Some(text)) = (
            self.create("div", style::SHARE_CONTAINER_ID, style::SHARE_CONTAINER_CLASS),
            self.create("button", style::SHARE_BUTTON_ID, style::SHARE_BUTTON_CLASS),
            self.create("span", "", ""),
        ) else {
            return;
        };
        text.set_text_content(Some(style::SHARE_LABEL));
        Self::append(&button, &text);
        Self::append(&container, &button);
        Self::append(&parent, &container);
    }

    fn open_share(&mut self, url: &str) {
        if let Err(err) =
            self.window
                .open_with_url_and_target_and_features(url, "_blank", style::SHARE_WINDOW_FEATURES)
        {
            report("window.open failed", &err);
        }
    }

    fn location(&self) -> String {
        self.window.location().href().unwrap_or_else(|err| {
            report("location.href unavailable", &err);
            String::new()
        })
    }

    fn set_body(&mut self, state: BodyState) {
        if let Some(body) = self.document.body() {
            body.set_class_name(state.class());
        }
    }

    fn set_emphasis(&mut self, button_id: &str, on: bool) {
        let Some(button) = self.element(button_id) else {
            return;
        };
        let classes = button.class_list();
        for class in style::EMPHASIS_CLASSES {
            let result = if on {
                classes.add_1(class)
            } else {
                classes.remove_1(class)
            };
            if let Err(err) = result {
                report("classList update failed", &err);
            }
        }
    }

    fn defer(&mut self, delay: Duration, task: DeferredTask) {
        let document = self.document.clone();
        let callback = Closure::once_into_js(move || run_task(&document, task));
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        if let Err(err) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), millis)
        {
            report("setTimeout failed", &err);
        }
    }
}

type BrowserShell = Shell<BrowserPage, LocalStorageStore>;

fn listen(
    target: &EventTarget,
    kind: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    // listeners live as long as the page
    closure.forget();
    Ok(())
}

/// Id of the button an event happened in, if any
fn clicked_button_id(event: &Event) -> Option<String> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let button = target.closest("button").ok()??;
    let id = button.id();
    (!id.is_empty()).then_some(id)
}

fn event_key(event: &Event) -> Option<String> {
    event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key)
}

/// Builds the calculator into the current page
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let page = BrowserPage::new()?;
    let document = page.document().clone();
    let store = LocalStorageStore::new(page.window());
    let mut shell: BrowserShell = Shell::new(page, store, CalculatorConfig::default());
    shell.setup();
    let shell = Rc::new(RefCell::new(shell));

    let on_click = Rc::clone(&shell);
    listen(&document, "click", move |event| {
        if let Some(id) = clicked_button_id(&event) {
            on_click.borrow_mut().click(&id);
        }
    })?;

    let on_key_down = Rc::clone(&shell);
    listen(&document, "keydown", move |event| {
        // every key belongs to the calculator, including while the flag input has focus
        event.prevent_default();
        if let Some(key) = event_key(&event) {
            on_key_down.borrow_mut().key_down(&key);
        }
    })?;

    let on_key_up = shell;
    listen(&document, "keyup", move |event| {
        if let Some(key) = event_key(&event) {
            on_key_up.borrow_mut().key_up(&key);
        }
    })?;

    console::log_1(&"Calculator WASM initialized".into());
    Ok(())
}

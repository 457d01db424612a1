//! `wasm-bindgen` exports for the content script.
//!
//! The JS side owns the event listeners and forwards each event here;
//! the returned flag says whether it must call `preventDefault()`.

use js_sys::{Function, JSON, Object, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{EventTarget, HtmlElement, KeyboardEvent, MouseEvent, Node};

use linemark_core::index::ScopePolicy;
use linemark_core::message::Message;
use linemark_core::session::{Response, Session};
use linemark_core::settings::{Settings, load_settings, save_settings};
use linemark_types::input::{InputEvent, KeyPress, PointerHit};

use crate::console;
use crate::dom::DomPage;
use crate::storage::LocalStorageStore;

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Whether key presses aimed at `target` are typing.
fn is_text_field(target: Option<EventTarget>) -> bool {
    let Some(element) = target.and_then(|t| t.dyn_into::<HtmlElement>().ok()) else {
        return false;
    };
    element.is_content_editable()
        || matches!(
            element.tag_name().to_ascii_lowercase().as_str(),
            "input" | "textarea" | "select"
        )
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console::install_panic_hook();
    console::init(log::LevelFilter::Info);
}

/// The highlighter attached to one page.
///
/// The content script owns the listeners and forwards each event:
///
/// ```js
/// import init, { LineHighlighter } from "./linemark_web.js";
///
/// await init();
/// const highlighter = new LineHighlighter();
/// highlighter.onStateChange((message) => chrome.runtime.sendMessage(message));
/// document.addEventListener("keydown", (event) => {
///   if (highlighter.keyDown(event)) {
///     event.preventDefault();
///     event.stopPropagation();
///   }
/// }, true);
/// document.addEventListener("click", (event) => {
///   if (highlighter.click(event)) event.preventDefault();
/// }, true);
/// window.addEventListener("scroll", () => highlighter.scroll(), { passive: true });
/// chrome.runtime.onMessage.addListener((message) => {
///   highlighter.handleMessage(message);
/// });
/// ```
///
/// `keyDown` and `click` return `true` exactly when the page must not
/// see the event.
#[wasm_bindgen]
pub struct LineHighlighter {
    session: Session<DomPage>,
    store: Option<LocalStorageStore>,
    on_state_change: Option<Function>,
}

#[wasm_bindgen]
impl LineHighlighter {
    /// Attach to the current window. Starts disabled.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<LineHighlighter, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let store = match LocalStorageStore::new(&window) {
            Ok(store) => Some(store),
            Err(e) => {
                log::warn!("Settings will not persist: {e}");
                None
            },
        };
        let settings = store
            .as_ref()
            .map(|store| load_settings(store))
            .unwrap_or_default();
        let page = DomPage::new(window).map_err(to_js_error)?;
        Ok(Self {
            session: Session::new(page, settings),
            store,
            on_state_change: None,
        })
    }

    /// Register `callback(message)`, called with a `stateChanged` message
    /// whenever the user toggles the highlighter.
    #[wasm_bindgen(js_name = onStateChange)]
    pub fn on_state_change(&mut self, callback: Function) {
        self.on_state_change = Some(callback);
    }

    #[wasm_bindgen(js_name = isEnabled)]
    pub fn is_enabled(&self) -> bool {
        self.session.is_enabled()
    }

    /// Returns whether the state changed.
    #[wasm_bindgen(js_name = setEnabled)]
    pub fn set_enabled(&mut self, enabled: bool) -> bool {
        self.session.set_enabled(enabled)
    }

    /// Replace how the navigable scope is chosen; applies from the next
    /// click.
    #[wasm_bindgen(js_name = setScopePolicy)]
    pub fn set_scope_policy(&mut self, include_div: bool, max_hops: u32, widen_to_article: bool) {
        self.session.set_scope_policy(ScopePolicy {
            include_div,
            max_hops: max_hops as usize,
            widen_to_article,
        });
    }

    /// `{ toggle, up, down }` with each shortcut's display label, for
    /// host UIs.
    #[wasm_bindgen(js_name = shortcutLabels)]
    pub fn shortcut_labels(&self, mac: bool) -> JsValue {
        let labels = Object::new();
        for (name, shortcut) in self.session.settings().shortcuts.iter() {
            let _ = Reflect::set(
                &labels,
                &JsValue::from_str(name),
                &JsValue::from_str(&shortcut.label(mac)),
            );
        }
        labels.into()
    }

    /// `keydown` listener body. Returns whether the event was consumed.
    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&mut self, event: &KeyboardEvent) -> bool {
        let press = KeyPress {
            key: event.key(),
            code: event.code(),
            ctrl: event.ctrl_key(),
            alt: event.alt_key(),
            shift: event.shift_key(),
            meta: event.meta_key(),
            in_text_field: is_text_field(event.target()),
        };
        let response = self.session.handle(InputEvent::Key(press));
        if let Response::Toggled(enabled) = response {
            self.notify(enabled);
        }
        response.is_consumed()
    }

    /// `click` listener body. Clicks are never consumed.
    pub fn click(&mut self, event: &MouseEvent) -> bool {
        let hit = PointerHit::new(
            f64::from(event.client_x()),
            f64::from(event.client_y()),
            f64::from(event.page_x()),
            f64::from(event.page_y()),
        );
        let target = event.target().and_then(|t| t.dyn_into::<Node>().ok());
        self.session
            .handle(InputEvent::Click { hit, target })
            .is_consumed()
    }

    /// `scroll` listener body.
    pub fn scroll(&mut self) {
        self.session.handle(InputEvent::Scroll);
    }

    /// Apply and persist a settings object given as JSON.
    #[wasm_bindgen(js_name = updateSettings)]
    pub fn update_settings(&mut self, json: &str) -> Result<(), JsValue> {
        let settings = Settings::from_json(json).map_err(to_js_error)?;
        if let Some(store) = self.store.as_mut() {
            save_settings(store, &settings).map_err(to_js_error)?;
        }
        self.session.apply_settings(settings);
        Ok(())
    }

    /// Handle a runtime message object. Returns whether the session
    /// changed; unknown messages are ignored.
    #[wasm_bindgen(js_name = handleMessage)]
    pub fn handle_message(&mut self, message: &JsValue) -> bool {
        let Some(json) = JSON::stringify(message).ok().and_then(|s| s.as_string()) else {
            return false;
        };
        match Message::from_json(&json) {
            Ok(message) => self.session.handle_message(message),
            Err(e) => {
                log::debug!("Ignoring message: {e}");
                false
            },
        }
    }

    fn notify(&self, enabled: bool) {
        let Some(callback) = &self.on_state_change else {
            return;
        };
        let message = match Message::StateChanged { enabled }.to_json() {
            Ok(json) => JSON::parse(&json),
            Err(e) => {
                log::error!("Failed to encode state change: {e}");
                return;
            },
        };
        match message {
            Ok(message) => {
                if let Err(e) = callback.call1(&JsValue::NULL, &message) {
                    log::warn!("State change callback failed: {e:?}");
                }
            },
            Err(e) => log::error!("Failed to build state change: {e:?}"),
        }
    }
}

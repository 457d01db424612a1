//! User settings: keyboard shortcuts and highlight color.
//!
//! The JSON shape is the one the settings popup stores:
//!
//! ```json
//! {
//!   "shortcuts": {
//!     "toggle": { "key": ";", "modifiers": ["ctrl"] },
//!     "up":     { "key": "f", "modifiers": [] },
//!     "down":   { "key": "v", "modifiers": [] }
//!   },
//!   "color": "yellow"
//! }
//! ```
//!
//! Anything that does not match it is replaced wholesale by the
//! defaults.

use serde::{Deserialize, Serialize};

use linemark_types::color::HighlightColor;
use linemark_types::error::{LinemarkError, Result};
use linemark_types::input::KeyPress;

/// A modifier that can be part of a shortcut. `Ctrl` also matches the
/// Meta (Cmd) key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Ctrl,
    Alt,
    Shift,
}

/// A key plus the exact set of modifiers that must be held with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortcut {
    pub key: String,
    pub modifiers: Vec<Modifier>,
}

impl Shortcut {
    pub fn new(key: &str, modifiers: &[Modifier]) -> Self {
        Self {
            key: key.to_string(),
            modifiers: modifiers.to_vec(),
        }
    }

    fn requires(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    /// Whether `press` triggers this shortcut.
    ///
    /// Keys compare case-insensitively after normalization; the held
    /// modifiers must equal the shortcut's set exactly.
    pub fn matches(&self, press: &KeyPress) -> bool {
        if press.is_modifier_only() {
            return false;
        }
        press.normalized_key() == self.key.to_lowercase()
            && (press.ctrl || press.meta) == self.requires(Modifier::Ctrl)
            && press.alt == self.requires(Modifier::Alt)
            && press.shift == self.requires(Modifier::Shift)
    }

    /// Human-readable form such as `Ctrl+Shift+F`, or `⌘+Shift+F` on
    /// mac.
    pub fn label(&self, mac: bool) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(self.modifiers.len() + 1);
        if self.requires(Modifier::Ctrl) {
            parts.push(if mac { "⌘" } else { "Ctrl" }.into());
        }
        if self.requires(Modifier::Alt) {
            parts.push(if mac { "⌥" } else { "Alt" }.into());
        }
        if self.requires(Modifier::Shift) {
            parts.push("Shift".into());
        }
        parts.push(self.key.to_uppercase());
        parts.join("+")
    }
}

/// What a key press asks the session to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    Toggle,
    Up,
    Down,
}

/// The three configurable shortcuts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortcuts {
    pub toggle: Shortcut,
    pub up: Shortcut,
    pub down: Shortcut,
}

impl Default for Shortcuts {
    fn default() -> Self {
        Self {
            toggle: Shortcut::new(";", &[Modifier::Ctrl]),
            up: Shortcut::new("f", &[]),
            down: Shortcut::new("v", &[]),
        }
    }
}

impl Shortcuts {
    /// Shortcuts paired with their stored names.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Shortcut)> {
        [("toggle", &self.toggle), ("up", &self.up), ("down", &self.down)].into_iter()
    }

    /// The action bound to `press`. Toggle wins when bindings overlap.
    pub fn action_for(&self, press: &KeyPress) -> Option<ShortcutAction> {
        if self.toggle.matches(press) {
            Some(ShortcutAction::Toggle)
        } else if self.up.matches(press) {
            Some(ShortcutAction::Up)
        } else if self.down.matches(press) {
            Some(ShortcutAction::Down)
        } else {
            None
        }
    }
}

/// Validated user settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Settings {
    pub shortcuts: Shortcuts,
    pub color: HighlightColor,
}

impl Settings {
    /// Parse and validate a stored settings object.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Parse a stored settings object, falling back to the defaults on
    /// any error.
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Invalid settings, using defaults: {e}");
                Self::default()
            },
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Structural checks serde cannot express.
    pub fn validate(&self) -> Result<()> {
        for (name, shortcut) in self.shortcuts.iter() {
            if shortcut.key.trim().is_empty() {
                return Err(LinemarkError::Settings(format!(
                    "shortcut `{name}` has an empty key"
                )));
            }
        }
        Ok(())
    }
}

// -------------------------------------------------------------------
// Storage
// -------------------------------------------------------------------

/// Where the serialized settings object is kept.
pub trait SettingsStore {
    /// The stored JSON, or `None` if nothing was saved yet.
    fn load(&self) -> Result<Option<String>>;

    fn save(&mut self, json: &str) -> Result<()>;
}

/// In-memory [`SettingsStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    contents: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `json`.
    pub fn with_contents(json: &str) -> Self {
        Self {
            contents: Some(json.to_string()),
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl SettingsStore for MemoryStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.contents.clone())
    }

    fn save(&mut self, json: &str) -> Result<()> {
        self.contents = Some(json.to_string());
        Ok(())
    }
}

/// Load settings from `store`. Never fails: a missing, unreadable or
/// invalid object yields the defaults.
pub fn load_settings(store: &dyn SettingsStore) -> Settings {
    match store.load() {
        Ok(Some(json)) => Settings::from_json_or_default(&json),
        Ok(None) => {
            log::debug!("No stored settings, using defaults");
            Settings::default()
        },
        Err(e) => {
            log::warn!("Failed to read settings, using defaults: {e}");
            Settings::default()
        },
    }
}

/// Serialize `settings` into `store`.
pub fn save_settings(store: &mut dyn SettingsStore, settings: &Settings) -> Result<()> {
    let json = settings.to_json()?;
    store.save(&json)
}

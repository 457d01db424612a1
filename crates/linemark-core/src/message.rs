//! Messages exchanged with the background coordinator.
//!
//! Tagged by `type`, camelCase, matching the extension runtime's message
//! objects:
//!
//! ```json
//! { "type": "stateChanged", "enabled": true }
//! { "type": "setEnabled", "enabled": false }
//! { "type": "updateSettings", "settings": { ... } }
//! ```

use serde::{Deserialize, Serialize};

use linemark_types::error::Result;
use linemark_types::page::PageHost;

use crate::session::Session;
use crate::settings::Settings;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Message {
    /// Outgoing: the user toggled the highlighter on this page.
    StateChanged { enabled: bool },
    /// Incoming: force the enabled state.
    SetEnabled { enabled: bool },
    /// Incoming: new settings were saved. Kept as raw JSON so an invalid
    /// object degrades to the defaults instead of dropping the message.
    UpdateSettings { settings: serde_json::Value },
}

impl Message {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl<P: PageHost> Session<P> {
    /// Apply an incoming coordinator message. Returns whether the
    /// session changed.
    pub fn handle_message(&mut self, message: Message) -> bool {
        match message {
            Message::SetEnabled { enabled } => self.set_enabled(enabled),
            Message::UpdateSettings { settings } => {
                let settings = Settings::from_json_or_default(&settings.to_string());
                let changed = settings != *self.settings();
                self.apply_settings(settings);
                changed
            },
            Message::StateChanged { .. } => {
                log::trace!("Ignoring outgoing-only message");
                false
            },
        }
    }
}

//! Settings persisted in `window.localStorage`.

use web_sys::{Storage, Window};

use linemark_core::settings::SettingsStore;
use linemark_types::error::{LinemarkError, Result};

/// Namespaced so the page's own keys are never touched.
const STORAGE_KEY: &str = "line-highlighter.settings";

pub struct LocalStorageStore {
    storage: Storage,
}

impl LocalStorageStore {
    pub fn new(window: &Window) -> Result<Self> {
        let storage = window
            .local_storage()
            .map_err(|e| LinemarkError::Storage(format!("{e:?}")))?
            .ok_or_else(|| LinemarkError::Storage("localStorage unavailable".into()))?;
        Ok(Self { storage })
    }
}

impl SettingsStore for LocalStorageStore {
    fn load(&self) -> Result<Option<String>> {
        self.storage
            .get_item(STORAGE_KEY)
            .map_err(|e| LinemarkError::Storage(format!("{e:?}")))
    }

    fn save(&mut self, json: &str) -> Result<()> {
        self.storage
            .set_item(STORAGE_KEY, json)
            .map_err(|e| LinemarkError::Storage(format!("{e:?}")))
    }
}

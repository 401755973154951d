//! Session preferences persisted independently of history

use std::sync::Arc;

use tracing::warn;

use crate::storage::{DARK_MODE_KEY, KeyValueStore, StorageError, Written};

pub struct Preferences {
    dark_mode: bool,
    storage: Arc<dyn KeyValueStore>,
}

impl Preferences {
    /// Load preferences. Missing or unparsable values fall back to light mode.
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let dark_mode = match storage.get(DARK_MODE_KEY) {
            Ok(Some(raw)) => serde_json::from_str::<bool>(&raw).unwrap_or_else(|e| {
                warn!("Stored dark mode preference is malformed, using light mode: {}", e);
                false
            }),
            Ok(None) => false,
            Err(e) => {
                warn!("Failed to read dark mode preference, using light mode: {}", e);
                false
            }
        };

        Self { dark_mode, storage }
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn set_dark_mode(&mut self, dark_mode: bool) -> Written<bool> {
        self.dark_mode = dark_mode;
        Written::new(dark_mode, self.persist())
    }

    /// Flip dark mode and persist the new value immediately
    pub fn toggle_dark_mode(&mut self) -> Written<bool> {
        self.set_dark_mode(!self.dark_mode)
    }

    fn persist(&self) -> Result<(), StorageError> {
        let value = if self.dark_mode { "true" } else { "false" };
        self.storage.set(DARK_MODE_KEY, value).inspect_err(|e| {
            warn!("Failed to persist dark mode preference: {}", e);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_default_is_light_mode() {
        let prefs = Preferences::load(Arc::new(MemoryStore::new()));
        assert!(!prefs.dark_mode());
    }

    #[test]
    fn test_toggle_persists() {
        let storage = Arc::new(MemoryStore::new());
        let mut prefs = Preferences::load(storage.clone());

        let written = prefs.toggle_dark_mode();
        assert!(written.value);
        assert!(written.is_durable());
        assert_eq!(storage.get(DARK_MODE_KEY).unwrap().as_deref(), Some("true"));

        assert!(Preferences::load(storage.clone()).dark_mode());

        prefs.toggle_dark_mode();
        assert!(!Preferences::load(storage).dark_mode());
    }

    #[test]
    fn test_malformed_value_falls_back_to_light_mode() {
        for raw in ["yes", "", "{\"dark\":true}", "TRUE"] {
            let storage = Arc::new(MemoryStore::new());
            storage.set(DARK_MODE_KEY, raw).unwrap();
            assert!(!Preferences::load(storage).dark_mode(), "raw {raw:?}");
        }
    }

    #[test]
    fn test_persist_failure_keeps_new_value() {
        let storage = Arc::new(MemoryStore::new());
        let mut prefs = Preferences::load(storage.clone());
        storage.set_fail_writes(true);

        let written = prefs.set_dark_mode(true);
        assert!(!written.is_durable());
        assert!(prefs.dark_mode());
        assert!(storage.get(DARK_MODE_KEY).unwrap().is_none());
    }
}

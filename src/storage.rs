//! Host key-value persistence boundary.
//!
//! The host shell implements [`KeyValueStore`] over whatever the platform
//! offers (localStorage, Preferences). Values are opaque JSON strings and
//! every write replaces the whole value for its key.

use std::collections::HashMap;
use std::sync::Mutex;

/// Key holding the JSON-serialized ordered recipe list.
pub const RECIPES_KEY: &str = "brewcoffee-recipes";
/// Key holding the theme preference; an absent key means follow the system.
pub const THEME_KEY: &str = "brewcoffee-theme";
/// Key holding the temperature unit preference.
pub const TEMP_UNIT_KEY: &str = "brewcoffee-temp-unit";

#[uniffi::export(with_foreign)]
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: String) -> Option<String>;
    fn set(&self, key: String, value: String);
    fn remove(&self, key: String);
}

/// In-memory store for tests and host-free use.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: String) -> Option<String> {
        self.entries.lock().unwrap().get(&key).cloned()
    }

    fn set(&self, key: String, value: String) {
        self.entries.lock().unwrap().insert(key, value);
    }

    fn remove(&self, key: String) {
        self.entries.lock().unwrap().remove(&key);
    }
}

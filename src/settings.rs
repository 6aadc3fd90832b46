//! User preferences: theme and temperature unit.
//!
//! One explicit object the host constructs at startup. Reads come from
//! memory; every mutation writes through to the key-value store. Values are
//! stored JSON-encoded.

use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::models::{TemperatureUnit, Theme};
use crate::storage::{KeyValueStore, TEMP_UNIT_KEY, THEME_KEY};

#[derive(Clone, Copy, Debug)]
struct Prefs {
    theme: Theme,
    temperature_unit: TemperatureUnit,
}

/// Preference state, load-on-init / save-on-mutation.
#[derive(uniffi::Object)]
pub struct Settings {
    kv: Arc<dyn KeyValueStore>,
    prefs: Mutex<Prefs>,
}

#[uniffi::export]
impl Settings {
    /// Read both preferences, defaulting on missing or unreadable values
    /// (theme: follow the system; unit: Fahrenheit).
    #[uniffi::constructor]
    pub fn load(kv: Arc<dyn KeyValueStore>) -> Arc<Self> {
        let theme = read_pref(kv.as_ref(), THEME_KEY, Theme::System);
        let temperature_unit = read_pref(kv.as_ref(), TEMP_UNIT_KEY, TemperatureUnit::Fahrenheit);
        Arc::new(Settings {
            kv,
            prefs: Mutex::new(Prefs {
                theme,
                temperature_unit,
            }),
        })
    }

    pub fn theme(&self) -> Theme {
        self.prefs.lock().unwrap().theme
    }

    /// `System` clears the stored key; the absence of a value is what
    /// "follow the system" means on disk.
    pub fn set_theme(&self, theme: Theme) {
        self.prefs.lock().unwrap().theme = theme;
        match theme {
            Theme::System => self.kv.remove(THEME_KEY.to_string()),
            _ => self.write_pref(THEME_KEY, &theme),
        }
    }

    pub fn temperature_unit(&self) -> TemperatureUnit {
        self.prefs.lock().unwrap().temperature_unit
    }

    pub fn set_temperature_unit(&self, unit: TemperatureUnit) {
        self.prefs.lock().unwrap().temperature_unit = unit;
        self.write_pref(TEMP_UNIT_KEY, &unit);
    }
}

impl Settings {
    fn write_pref<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => self.kv.set(key.to_string(), json),
            Err(e) => warn!("failed to serialize preference {key}: {e}"),
        }
    }
}

fn read_pref<T: DeserializeOwned>(kv: &dyn KeyValueStore, key: &str, default: T) -> T {
    match kv.get(key.to_string()) {
        Some(raw) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!("stored preference {key} unreadable ({e}), using default");
                default
            }
        },
        None => default,
    }
}

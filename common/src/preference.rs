use std::collections::HashMap;

use crate::{error::DashboardError, types::ScalePreference};

pub const SCALE_PREF_KEY: &str = "scalePref";

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), DashboardError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.to_string(), value.to_string());
        Self { entries }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), DashboardError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct PreferenceStore<S> {
    backend: S,
}

impl<S: KeyValueStore> PreferenceStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    // Anything other than exactly `K`, `C` or `F` loads as the default.
    pub fn load(&self) -> ScalePreference {
        self.backend
            .get(SCALE_PREF_KEY)
            .and_then(|raw| raw.parse::<ScalePreference>().ok())
            .unwrap_or_default()
    }

    pub fn save(&mut self, pref: ScalePreference) -> Result<(), DashboardError> {
        self.backend.set(SCALE_PREF_KEY, pref.as_str())
    }
}

//! Host settings bag.
//!
//! The host keeps a flat JSON object per extension:
//!
//! ```json
//! { "enabled": false, "timeIncrement": 15, "currentTime": 1170 }
//! ```
//!
//! Missing keys are filled from defaults when loading, so settings written by
//! older versions keep working. `timeIncrement` is only written once a fixed
//! increment is in force; without it the configured step policy stays.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{DEFAULT_INCREMENT, DEFAULT_START};
use crate::error::{SlasherError, SlasherResult};

/// Persisted, host-visible engine settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Whether slasher logic runs at all.
    pub enabled: bool,
    /// Fixed minutes added per user message, if one has been chosen.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_increment: Option<u32>,
    /// Current story time in minutes since midnight.
    pub current_time: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: false,
            time_increment: None,
            current_time: DEFAULT_START,
        }
    }
}

impl Settings {
    /// Parse a settings object, filling gaps with defaults.
    pub fn from_json(json: &str) -> SlasherResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The increment a host should display: the saved one or the default.
    pub fn increment_or_default(&self) -> u32 {
        self.time_increment.unwrap_or(DEFAULT_INCREMENT)
    }

    /// Serialize as pretty JSON.
    pub fn to_json(&self) -> SlasherResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Where settings live between runs.
pub trait SettingsStore {
    /// Load saved settings, or `None` if nothing has been saved yet.
    fn load(&self) -> SlasherResult<Option<Settings>>;

    /// Persist settings.
    fn save(&mut self, settings: &Settings) -> SlasherResult<()>;
}

impl<S: SettingsStore + ?Sized> SettingsStore for Box<S> {
    fn load(&self) -> SlasherResult<Option<Settings>> {
        (**self).load()
    }

    fn save(&mut self, settings: &Settings) -> SlasherResult<()> {
        (**self).save(settings)
    }
}

/// In-memory store, for tests and hosts without persistence.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    saved: Option<Settings>,
    writes: usize,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `settings`.
    pub fn with(settings: Settings) -> Self {
        Self {
            saved: Some(settings),
            writes: 0,
        }
    }

    /// Number of saves so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl SettingsStore for MemoryStore {
    fn load(&self) -> SlasherResult<Option<Settings>> {
        Ok(self.saved)
    }

    fn save(&mut self, settings: &Settings) -> SlasherResult<()> {
        self.saved = Some(*settings);
        self.writes += 1;
        Ok(())
    }
}

/// JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Use the file at `path`. It does not need to exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for JsonFileStore {
    fn load(&self) -> SlasherResult<Option<Settings>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let json = std::fs::read_to_string(&self.path)
            .map_err(|e| SlasherError::Settings(format!("{}: {e}", self.path.display())))?;
        Settings::from_json(&json).map(Some)
    }

    fn save(&mut self, settings: &Settings) -> SlasherResult<()> {
        std::fs::write(&self.path, settings.to_json()?)
            .map_err(|e| SlasherError::Settings(format!("{}: {e}", self.path.display())))?;
        debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_keys_get_defaults() {
        let s = Settings::from_json(r#"{"enabled": true}"#).unwrap();
        assert!(s.enabled);
        assert_eq!(s.time_increment, None);
        assert_eq!(s.increment_or_default(), 15);
        assert_eq!(s.current_time, 1170);

        let s = Settings::from_json("{}").unwrap();
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn uses_camel_case_keys() {
        let settings = Settings {
            time_increment: Some(15),
            ..Settings::default()
        };
        let json = settings.to_json().unwrap();
        assert!(json.contains("\"timeIncrement\": 15"));
        assert!(json.contains("\"currentTime\": 1170"));
    }

    #[test]
    fn unset_increment_is_not_written() {
        let json = Settings::default().to_json().unwrap();
        assert!(!json.contains("timeIncrement"));
        assert_eq!(Settings::from_json(&json).unwrap(), Settings::default());
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            Settings::from_json("not json"),
            Err(SlasherError::Json(_))
        ));
    }

    #[test]
    fn memory_store_counts_writes() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load().unwrap(), None);
        store.save(&Settings::default()).unwrap();
        store.save(&Settings::default()).unwrap();
        assert_eq!(store.writes(), 2);
        assert_eq!(store.load().unwrap(), Some(Settings::default()));
    }

    #[test]
    fn file_store_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("slasher.json"));
        assert_eq!(store.load().unwrap(), None);

        let settings = Settings {
            enabled: true,
            time_increment: Some(30),
            current_time: 1300,
        };
        store.save(&settings).unwrap();
        assert_eq!(store.load().unwrap(), Some(settings));
    }

    #[test]
    fn file_store_fills_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("partial.json");
        std::fs::write(&path, r#"{"currentTime": 1260}"#).unwrap();
        let s = JsonFileStore::new(&path).load().unwrap().unwrap();
        assert_eq!(s.current_time, 1260);
        assert_eq!(s.increment_or_default(), 15);
        assert!(!s.enabled);
    }
}

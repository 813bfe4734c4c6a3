//! JSON-based persistence for the training settings record.
//!
//! Reads and writes [`Settings`] to a single `settings.json` file.  The
//! default location is the process working directory; the command-line
//! driver can point the store anywhere else.
//!
//! # File format
//!
//! A pretty-printed JSON object with all eight fields:
//!
//! ```json
//! {
//!   "model_save_path": "/models/out",
//!   "model_name": "gpt2",
//!   "hf_token": "",
//!   "finetune": false,
//!   "device": "cpu",
//!   "dataset_path": "/data/train",
//!   "trust_remote_code": false,
//!   "low_cpu_mem_usage": true
//! }
//! ```
//!
//! There is no version field.  Loading relies on `#[serde(default)]` on
//! [`Settings`]: missing keys take their defaults and unknown keys are
//! skipped, so files written by older or newer builds still load.
//!
//! # Writes
//!
//! The record is written to a sibling temporary file and renamed over the
//! target.  A crash mid-write leaves either the old file or the new one, never
//! a truncated mix.  A file corrupted by other means is still handled: load
//! reports [`StorageError::Parse`] and the caller keeps its defaults.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use thiserror::Error;
use trainer_core::Settings;

use crate::application::session::SettingsRepository;

/// File name used when no explicit path is given.
pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";

/// Error type for settings file operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing settings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but is not a valid settings record.
    #[error("failed to parse settings at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The record could not be serialized to JSON.
    #[error("failed to serialize settings: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// File-backed settings repository.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Creates a store backed by `path`.  Nothing is read until [`load`](Self::load).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// A store backed by `settings.json` in the working directory.
    pub fn in_working_dir() -> Self {
        Self::new(DEFAULT_SETTINGS_FILE)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the record, overlaying present fields on the defaults.
    ///
    /// Returns `Ok(None)` when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] for file-system errors other than "not
    /// found", and [`StorageError::Parse`] if the JSON is malformed, a field
    /// has the wrong type, or `device` is not `"cpu"` / `"gpu"`.
    pub fn load(&self) -> Result<Option<Settings>, StorageError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "settings file absent");
                return Ok(None);
            }
            Err(source) => {
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let settings: Settings =
            serde_json::from_str(&content).map_err(|source| StorageError::Parse {
                path: self.path.clone(),
                source,
            })?;
        tracing::debug!(path = %self.path.display(), "settings loaded");
        Ok(Some(settings))
    }

    /// Persists all eight fields, replacing the file.
    ///
    /// Creates the parent directory if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] for file-system failures or
    /// [`StorageError::Serialize`] if serialization fails.
    pub fn save(&self, settings: &Settings) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(settings).map_err(StorageError::Serialize)?;

        // Ensure directory exists before writing.
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|source| StorageError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        replace_via_temp(&self.path, |temp| std::fs::write(temp, &content))?;

        tracing::debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::in_working_dir()
    }
}

impl SettingsRepository for SettingsStore {
    type Error = StorageError;

    fn load(&self) -> Result<Option<Settings>, StorageError> {
        SettingsStore::load(self)
    }

    fn save(&self, settings: &Settings) -> Result<(), StorageError> {
        SettingsStore::save(self, settings)
    }
}

/// Writes `target` through a sibling temp file and renames it into place.
///
/// The temp file is removed on every failure path, including a write that
/// fails after creating it.
fn replace_via_temp(
    target: &Path,
    write: impl FnOnce(&Path) -> std::io::Result<()>,
) -> Result<(), StorageError> {
    let temp = temp_path(target);
    if let Err(source) = write(&temp) {
        let _ = std::fs::remove_file(&temp);
        return Err(StorageError::Io { path: temp, source });
    }
    if let Err(source) = std::fs::rename(&temp, target) {
        let _ = std::fs::remove_file(&temp);
        return Err(StorageError::Io {
            path: target.to_path_buf(),
            source,
        });
    }
    Ok(())
}

/// `settings.json` → `settings.json.<pid>.tmp`, in the same directory so the
/// rename never crosses file systems.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from(DEFAULT_SETTINGS_FILE));
    name.push(format!(".{}.tmp", std::process::id()));
    path.with_file_name(name)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use trainer_core::Device;

    fn store_in(dir: &tempfile::TempDir) -> SettingsStore {
        SettingsStore::new(dir.path().join(DEFAULT_SETTINGS_FILE))
    }

    fn populated() -> Settings {
        Settings {
            model_save_path: "/models/out".to_string(),
            model_name: "gpt2".to_string(),
            hf_token: "hf_abc".to_string(),
            finetune: true,
            device: Device::Gpu,
            dataset_path: "/data/train".to_string(),
            trust_remote_code: true,
            low_cpu_mem_usage: false,
        }
    }

    // ── load ──────────────────────────────────────────────────────────────────

    #[test]
    fn test_load_returns_none_when_file_absent() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        // Act
        let loaded = store.load().expect("absent file is not an error");

        // Assert
        assert_eq!(loaded, None);
    }

    #[test]
    fn test_load_partial_file_overlays_defaults() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), r#"{"model_name": "X"}"#).unwrap();

        // Act
        let loaded = store.load().unwrap().expect("file present");

        // Assert
        let expected = Settings {
            model_name: "X".to_string(),
            ..Settings::default()
        };
        assert_eq!(loaded, expected);
    }

    #[test]
    fn test_load_malformed_json_returns_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "{ \"model_name\": ").unwrap();

        let result = store.load();

        assert!(matches!(result, Err(StorageError::Parse { .. })));
    }

    #[test]
    fn test_load_out_of_enum_device_returns_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), r#"{"device": "tpu"}"#).unwrap();

        let err = store.load().unwrap_err();

        assert!(matches!(err, StorageError::Parse { .. }));
        assert!(err.to_string().contains("settings.json"));
    }

    #[test]
    fn test_load_directory_in_place_of_file_returns_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::create_dir(store.path()).unwrap();

        let result = store.load();

        assert!(matches!(result, Err(StorageError::Io { .. })));
    }

    // ── save ──────────────────────────────────────────────────────────────────

    #[test]
    fn test_save_then_load_round_trips_all_fields() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        // Act
        store.save(&populated()).unwrap();
        let loaded = store.load().unwrap();

        // Assert
        assert_eq!(loaded, Some(populated()));
    }

    #[test]
    fn test_save_writes_all_eight_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.save(&Settings::default()).unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let object = value.as_object().expect("top-level object");
        assert_eq!(object.len(), 8);
        assert_eq!(object["device"], "cpu");
        assert_eq!(object["low_cpu_mem_usage"], true);
    }

    #[test]
    fn test_save_overwrites_previous_content_and_drops_unknown_keys() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), r#"{"model_name": "old", "epochs": 3}"#).unwrap();
        let mut settings = store.load().unwrap().unwrap();
        settings.model_name = "new".to_string();

        // Act
        store.save(&settings).unwrap();

        // Assert
        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"new\""));
        assert!(!raw.contains("epochs"));
    }

    #[test]
    fn test_save_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("nested").join("deeper").join("s.json"));

        store.save(&populated()).unwrap();

        assert!(store.path().is_file());
    }

    #[test]
    fn test_save_leaves_no_temporary_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.save(&populated()).unwrap();

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(Result::ok)
            .map(|e| e.file_name())
            .collect();
        assert_eq!(names, vec![OsString::from(DEFAULT_SETTINGS_FILE)]);
    }

    #[test]
    fn test_save_into_unwritable_location_returns_io_error() {
        // Arrange: the parent "directory" is a regular file.
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();
        let store = SettingsStore::new(blocker.join(DEFAULT_SETTINGS_FILE));

        // Act
        let result = store.save(&populated());

        // Assert
        assert!(matches!(result, Err(StorageError::Io { .. })));
    }

    #[test]
    fn test_failed_write_removes_partial_temp_file() {
        // Arrange: the write creates the temp file, then fails mid-way.
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join(DEFAULT_SETTINGS_FILE);
        std::fs::write(&target, "previous").unwrap();

        // Act
        let result = replace_via_temp(&target, |temp| {
            std::fs::write(temp, "{\n  \"model_na")?;
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
        });

        // Assert
        assert!(matches!(result, Err(StorageError::Io { .. })));
        assert!(!temp_path(&target).exists());
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "previous");
    }

    // ── paths ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_default_store_uses_settings_json_in_working_dir() {
        let store = SettingsStore::default();
        assert_eq!(store.path(), Path::new("settings.json"));
    }

    #[test]
    fn test_temp_path_is_sibling_of_target() {
        let temp = temp_path(Path::new("/cfg/settings.json"));
        assert_eq!(temp.parent(), Some(Path::new("/cfg")));
        assert!(temp
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with("settings.json.") && n.ends_with(".tmp")));
    }
}

//! Command bridge: exposes the session use cases to a presentation layer.
//!
//! A front end (desktop window, terminal driver, test) never touches the
//! [`SessionController`] directly.  It holds an [`AppState`] and calls the
//! command functions below, each of which returns a [`CommandResult`].
//!
//! # Form state vs. canonical settings (for beginners)
//!
//! The front end edits a *form*: a draft [`Settings`] that changes as the user
//! types.  The canonical record inside the controller only changes when the
//! user presses Save.  This mirrors a desktop form where widgets hold the
//! unsaved values:
//!
//! ```text
//! update_field / browse_path ──► AppState.form   (draft)
//! save_settings              ──► form copied into the controller, then persisted
//! start_training             ──► validates the controller's record
//! ```
//!
//! Field access goes through [`SettingField`], parsed once from the key the
//! front end sends.  There is no per-widget string lookup.
//!
//! # Data Transfer Objects (DTOs)
//!
//! DTOs carry only plain strings and booleans so any front end can render
//! them, and they serialize with serde for front ends that speak JSON.
//!
//! # `CommandResult<T>` wrapper
//!
//! Every command returns the same shape:
//! `{ success: bool, data: T | null, error: string | null }`.
//! Failures are also written to the console, which stays the user's primary
//! feedback channel.

use std::path::Path;

use serde::{Deserialize, Serialize};
use trainer_core::{FieldKind, LogEntry, LogLevel, LogSink, SettingField, Settings};

use crate::application::session::{LoadStatus, SessionController, StartResult};
use crate::infrastructure::{console::ConsoleBuffer, storage::settings::SettingsStore};

/// Controller wired to the concrete file store and in-memory console.
pub type Session = SessionController<SettingsStore, ConsoleBuffer>;

// ── Shared application state ──────────────────────────────────────────────────

/// Everything a front end needs: the session and the draft form.
///
/// Single-threaded: one command runs at a time, so plain `&mut` access is
/// enough and no locking is involved.
pub struct AppState {
    /// Canonical settings, persistence and console.
    pub session: Session,
    /// Draft values bound to the form controls.
    pub form: Settings,
}

impl AppState {
    /// Loads persisted settings and seeds the form with them.
    ///
    /// A missing or unreadable file leaves the defaults in place; the
    /// console says why.
    pub fn new(store: SettingsStore) -> Self {
        let mut session = SessionController::new(store, ConsoleBuffer::new());
        let status = session.load_settings();
        tracing::debug!(?status, "initial settings load");
        let form = session.settings().clone();
        Self { session, form }
    }

    /// Convenience for the console entries.
    pub fn console(&self) -> &ConsoleBuffer {
        self.session.console()
    }

    /// Reloads from disk, replacing both the canonical record and the form.
    pub fn reload(&mut self) -> LoadStatus {
        let status = self.session.load_settings();
        self.form = self.session.settings().clone();
        status
    }
}

// ── Data Transfer Objects (Presentation layer) ────────────────────────────────

/// One form control's binding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldDto {
    pub key: String,
    pub label: String,
    /// `"path"`, `"text"`, `"secret"`, `"boolean"` or `"device"`.
    pub kind: String,
    pub required: bool,
    /// Raw value for editing.
    pub value: String,
    /// Value safe to print; secrets are masked.
    pub display: String,
}

/// A console entry ready for rendering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogEntryDto {
    pub timestamp: String,
    pub level: LogLevel,
    pub message: String,
    /// `[timestamp] message`.
    pub line: String,
}

impl From<&LogEntry> for LogEntryDto {
    fn from(e: &LogEntry) -> Self {
        Self {
            timestamp: e.formatted_timestamp(),
            level: e.level,
            message: e.message.clone(),
            line: e.to_string(),
        }
    }
}

/// Result of a start request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StartDto {
    pub started: bool,
    /// Keys of the empty required fields, in declaration order.
    pub missing_fields: Vec<String>,
}

impl From<&StartResult> for StartDto {
    fn from(r: &StartResult) -> Self {
        match r {
            StartResult::Started => Self {
                started: true,
                missing_fields: Vec::new(),
            },
            StartResult::Rejected(missing) => Self {
                started: false,
                missing_fields: missing.iter().map(|f| f.key().to_string()).collect(),
            },
        }
    }
}

/// Unified response wrapper used by every command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResult<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

/// Returns the form's bindings in declaration order.
pub fn get_form(state: &AppState) -> CommandResult<Vec<FieldDto>> {
    let fields = SettingField::ALL
        .into_iter()
        .map(|field| FieldDto {
            key: field.key().to_string(),
            label: field.label().to_string(),
            kind: field.kind().to_string(),
            required: field.is_required(),
            value: raw_value(&state.form, field),
            display: state.form.display_value(field),
        })
        .collect();
    CommandResult::ok(fields)
}

/// Writes user text into one form field.
///
/// The canonical record is untouched until [`save_settings`].
pub fn update_field(state: &mut AppState, key: &str, value: &str) -> CommandResult<()> {
    let result = key
        .parse::<SettingField>()
        .and_then(|field| state.form.set_from_str(field, value));
    match result {
        Ok(()) => CommandResult::ok(()),
        Err(e) => {
            state.session.console_mut().error(&e.to_string());
            CommandResult::err(e.to_string())
        }
    }
}

/// Directory-picker result: writes `selected` into a path field.
///
/// The directory must exist; it is stored in canonical absolute form.
/// Returns the stored value.
pub fn browse_path(state: &mut AppState, key: &str, selected: &Path) -> CommandResult<String> {
    match pick_directory(&mut state.form, key, selected) {
        Ok(stored) => CommandResult::ok(stored),
        Err(msg) => {
            state.session.console_mut().error(&msg);
            CommandResult::err(msg)
        }
    }
}

/// Save trigger: the form becomes canonical and is written to disk.
pub fn save_settings(state: &mut AppState) -> CommandResult<()> {
    match state.session.save_settings(state.form.clone()) {
        Ok(()) => CommandResult::ok(()),
        Err(e) => CommandResult::err(format!("failed to save settings: {e}")),
    }
}

/// Start trigger.  Rejection is a successful command with `started == false`.
pub fn start_training(state: &mut AppState) -> CommandResult<StartDto> {
    let result = state.session.start_training();
    CommandResult::ok(StartDto::from(&result))
}

/// Clear trigger.
pub fn clear_console(state: &mut AppState) -> CommandResult<()> {
    state.session.clear_console();
    CommandResult::ok(())
}

/// Returns every console entry currently shown.
pub fn get_console(state: &AppState) -> CommandResult<Vec<LogEntryDto>> {
    CommandResult::ok(state.console().entries().iter().map(LogEntryDto::from).collect())
}

fn raw_value(settings: &Settings, field: SettingField) -> String {
    match settings.text(field) {
        Some(text) => text.to_string(),
        None => settings.display_value(field),
    }
}

fn pick_directory(form: &mut Settings, key: &str, selected: &Path) -> Result<String, String> {
    let field = key.parse::<SettingField>().map_err(|e| e.to_string())?;
    if field.kind() != FieldKind::Path {
        return Err(format!("field {field} is not a path"));
    }
    if !selected.is_dir() {
        return Err(format!("not a directory: {}", selected.display()));
    }
    let canonical = selected
        .canonicalize()
        .map_err(|e| format!("cannot resolve {}: {e}", selected.display()))?;
    let stored = canonical
        .to_str()
        .ok_or_else(|| format!("path is not valid UTF-8: {}", canonical.display()))?
        .to_string();
    form.set_from_str(field, &stored).map_err(|e| e.to_string())?;
    Ok(stored)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

//! SessionController: the Save / Start / Clear use cases.
//!
//! The controller owns the canonical [`Settings`] record and reports every
//! outcome through the console [`LogSink`].  It never returns a dialog-style
//! error to the presentation layer: load, save and validation failures are
//! recovered here and shown as error entries.
//!
//! # Operation flow (for beginners)
//!
//! ```text
//! startup ──► load_settings ──► (user edits the form) ──► save_settings(form)
//!                                                              │
//!                         clear_console ◄── start_training ◄───┘
//! ```
//!
//! - `load_settings` overlays the persisted file on the defaults.
//! - `save_settings` makes the form's snapshot canonical, then persists it.
//! - `start_training` validates the canonical record (not unsaved form edits)
//!   and echoes the configuration.  It does not run anything.
//! - `clear_console` empties the console and notes that it did.
//!
//! # Testability
//!
//! Persistence is reached through the [`SettingsRepository`] trait so unit
//! tests can inject a stub without touching the file system.

use trainer_core::{ensure_startable, LogSink, SettingField, Settings, ValidationError};

/// Console text for the individual outcomes.
pub mod messages {
    pub const LOADED: &str = "Settings loaded successfully!";
    pub const SAVED: &str = "Settings saved successfully!";
    pub const STARTING: &str = "Starting training with configuration:";
    pub const STARTED: &str = "Training started...";
    pub const CLEARED: &str = "Console cleared";
}

/// Persistence port for the settings record.
pub trait SettingsRepository {
    type Error: std::error::Error;

    /// Returns the persisted record overlaid on defaults, or `None` if
    /// nothing has been persisted yet.
    fn load(&self) -> Result<Option<Settings>, Self::Error>;

    /// Replaces the persisted record with `settings`.
    fn save(&self, settings: &Settings) -> Result<(), Self::Error>;
}

/// Outcome of [`SessionController::load_settings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// A persisted record was found and is now canonical.
    Loaded,
    /// Nothing is persisted; the current record is unchanged.
    NotFound,
    /// The persisted record could not be read; the current record is unchanged.
    Failed,
}

/// Outcome of a start request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartResult {
    /// Every required field is set.
    Started,
    /// These required fields are empty, in declaration order.
    Rejected(Vec<SettingField>),
}

impl StartResult {
    pub fn is_started(&self) -> bool {
        matches!(self, StartResult::Started)
    }
}

/// Decides whether `settings` may be used to start training.
///
/// Pure: no logging, no I/O.
pub fn start(settings: &Settings) -> StartResult {
    match ensure_startable(settings) {
        Ok(()) => StartResult::Started,
        Err(ValidationError::MissingFields(missing)) => StartResult::Rejected(missing),
    }
}

/// Orchestrates the user-facing operations against a repository and a console.
pub struct SessionController<R, L> {
    repository: R,
    console: L,
    settings: Settings,
}

impl<R, L> SessionController<R, L>
where
    R: SettingsRepository,
    L: LogSink,
{
    /// Creates a controller holding the default record.
    ///
    /// Call [`load_settings`](Self::load_settings) to pick up a persisted file.
    pub fn new(repository: R, console: L) -> Self {
        Self {
            repository,
            console,
            settings: Settings::default(),
        }
    }

    /// The canonical record.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn console(&self) -> &L {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut L {
        &mut self.console
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Loads the persisted record.
    ///
    /// A missing file is silent.  A read or parse failure keeps the current
    /// record and logs exactly one error entry.
    pub fn load_settings(&mut self) -> LoadStatus {
        match self.repository.load() {
            Ok(Some(settings)) => {
                self.settings = settings;
                self.console.success(messages::LOADED);
                LoadStatus::Loaded
            }
            Ok(None) => {
                tracing::debug!("no persisted settings; using defaults");
                LoadStatus::NotFound
            }
            Err(e) => {
                tracing::warn!("failed to load settings: {e}");
                self.console.error(&format!("Error loading settings: {e}"));
                LoadStatus::Failed
            }
        }
    }

    /// Makes `form` the canonical record and persists it.
    ///
    /// The in-memory record is updated even if the write fails, so the next
    /// start request sees what the user saved.
    ///
    /// # Errors
    ///
    /// Returns the repository error after logging it.
    pub fn save_settings(&mut self, form: Settings) -> Result<(), R::Error> {
        self.settings = form;
        match self.repository.save(&self.settings) {
            Ok(()) => {
                self.console.success(messages::SAVED);
                Ok(())
            }
            Err(e) => {
                tracing::error!("failed to save settings: {e}");
                self.console.error(&format!("Error saving settings: {e}"));
                Err(e)
            }
        }
    }

    /// Validates the canonical record and echoes it to the console.
    ///
    /// On rejection a single error entry names the missing fields.  On
    /// success the console gets a header, one `key: value` line per field in
    /// declaration order, and a trailing success entry.
    pub fn start_training(&mut self) -> StartResult {
        let result = start(&self.settings);
        match &result {
            StartResult::Rejected(missing) => {
                let err = ValidationError::MissingFields(missing.clone());
                tracing::debug!("start rejected: {err}");
                self.console.error(&err.to_string());
            }
            StartResult::Started => {
                self.console.info(messages::STARTING);
                for field in SettingField::ALL {
                    let line = format!("{}: {}", field.key(), self.settings.display_value(field));
                    self.console.info(&line);
                }
                self.console.success(messages::STARTED);
                tracing::info!(
                    model = %self.settings.model_name,
                    device = %self.settings.device,
                    "training start accepted"
                );
            }
        }
        result
    }

    /// Empties the console, then logs that it did.
    pub fn clear_console(&mut self) {
        self.console.clear();
        self.console.info(messages::CLEARED);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

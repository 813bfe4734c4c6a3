//! Storage infrastructure: settings file persistence.
//!
//! This module provides a thin adapter between the application and the
//! file system.  The `settings` sub-module handles:
//!
//! - Reading `settings.json` and overlaying it on the defaults.
//! - Writing the full record back when the user saves.
//! - Reporting "nothing persisted yet" on first run without treating it as an error.
//!
//! Keeping storage concerns here means the file format can change without
//! touching the session use cases, which only see the `SettingsRepository` trait.

pub mod settings;

//! # trainer-core
//!
//! Shared library for the training console containing the settings record,
//! the static field table, start-request validation, and the leveled console
//! log types.
//!
//! It has zero dependencies on the file system, terminals, or UI frameworks.
//!
//! # Architecture overview (for beginners)
//!
//! The training console is a configuration form for a model training job:
//! paths, a model name, an access token, a device choice and a few boolean
//! flags.  The user edits the form, saves it to `settings.json`, and asks to
//! start training.  Every outcome is reported in a timestamped log console.
//!
//! This crate (`trainer-core`) is the pure foundation.  It defines:
//!
//! - **`domain`** – The [`Settings`] record and its defaults, the
//!   [`SettingField`] table used for typed form binding, and the
//!   [`validate_for_start`] rule.
//!
//! - **`log`** – What a console entry is ([`LogEntry`], [`LogLevel`]) and the
//!   [`LogSink`] trait every console implements.
//!
//! Loading and saving the record, and orchestrating the Save / Start / Clear
//! actions, live in the `trainer-console` crate.

pub mod domain;
pub mod log;

// Re-export the most-used types at the crate root so callers can write
// `trainer_core::Settings` instead of `trainer_core::domain::settings::Settings`.
pub use domain::field::{FieldKind, SettingField};
pub use domain::settings::{Device, FieldError, FieldValue, ParseDeviceError, Settings};
pub use domain::validation::{ensure_startable, validate_for_start, ValidationError};
pub use log::{LogEntry, LogLevel, LogSink};

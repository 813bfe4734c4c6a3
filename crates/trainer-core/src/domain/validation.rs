//! Start-request validation.
//!
//! A training job can only start once the three required fields
//! ([`SettingField::REQUIRED`]) are filled in.  A field counts as missing when
//! its text is the empty string; whitespace is left for the user to see.

use thiserror::Error;

use super::field::SettingField;
use super::settings::Settings;

/// Error returned when a start request fails validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// One or more required fields are empty, in declaration order.
    #[error("Missing required fields: {}", join_keys(.0))]
    MissingFields(Vec<SettingField>),
}

impl ValidationError {
    /// The missing fields, in declaration order.
    pub fn missing_fields(&self) -> &[SettingField] {
        match self {
            ValidationError::MissingFields(fields) => fields,
        }
    }
}

/// Returns the required fields that are empty in `settings`.
///
/// The list follows [`SettingField::REQUIRED`] order.  An empty list means the
/// record may be used to start training.
pub fn validate_for_start(settings: &Settings) -> Vec<SettingField> {
    SettingField::REQUIRED
        .into_iter()
        .filter(|field| settings.text(*field).map_or(true, str::is_empty))
        .collect()
}

/// Like [`validate_for_start`] but as a `Result`.
///
/// # Errors
///
/// Returns [`ValidationError::MissingFields`] if any required field is empty.
pub fn ensure_startable(settings: &Settings) -> Result<(), ValidationError> {
    let missing = validate_for_start(settings);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingFields(missing))
    }
}

/// Joins field keys for display: `"model_save_path, dataset_path"`.
pub fn join_keys(fields: &[SettingField]) -> String {
    fields
        .iter()
        .map(|f| f.key())
        .collect::<Vec<_>>()
        .join(", ")
}

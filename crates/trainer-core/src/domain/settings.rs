//! The canonical settings record for a training job.
//!
//! [`Settings`] is the single source of truth for what the user configured.
//! Form controls are two-way bindings at the edge: they read a field with
//! [`Settings::get`] and write it back with [`Settings::set`] or
//! [`Settings::set_from_str`].  Nothing else holds a copy that can drift.
//!
//! # Serde default values (for beginners)
//!
//! The struct carries `#[serde(default)]`, which tells serde to start from
//! [`Settings::default()`] and overwrite only the keys actually present in
//! the input.  A persisted file containing only `{"model_name": "X"}` therefore
//! loads as the defaults with `model_name == "X"`.  Keys serde does not know
//! are skipped, so older or newer files keep loading.
//!
//! A key that is present but has the wrong shape (a string where a boolean is
//! expected, or a `device` other than `"cpu"` / `"gpu"`) is a parse error for
//! the whole record.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::field::{FieldKind, SettingField};

/// Text shown instead of a non-empty secret.
pub const SECRET_MASK: &str = "****";

/// Errors raised while binding a form value to a field.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    /// The name does not match any field in the settings record.
    #[error("unknown setting field: {0}")]
    UnknownField(String),

    /// The value's type does not match the field's kind.
    #[error("field {field} expects a {expected} value")]
    TypeMismatch {
        field: SettingField,
        expected: FieldKind,
    },

    /// Text input could not be parsed for the field.
    #[error("invalid value {value:?} for field {field}: {reason}")]
    InvalidValue {
        field: SettingField,
        value: String,
        reason: String,
    },
}

// ── Device ────────────────────────────────────────────────────────────────────

/// Compute device the training job should run on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    #[default]
    Cpu,
    Gpu,
}

impl Device {
    pub fn as_str(self) -> &'static str {
        match self {
            Device::Cpu => "cpu",
            Device::Gpu => "gpu",
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when text does not name a supported device.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unsupported device {0:?}: expected \"cpu\" or \"gpu\"")]
pub struct ParseDeviceError(pub String);

impl FromStr for Device {
    type Err = ParseDeviceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cpu" => Ok(Device::Cpu),
            "gpu" => Ok(Device::Gpu),
            _ => Err(ParseDeviceError(s.to_string())),
        }
    }
}

// ── Field values ──────────────────────────────────────────────────────────────

/// A typed value read from or written to one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Value of a `Path`, `Text` or `Secret` field.
    Text(String),
    /// Value of a `Flag` field.
    Flag(bool),
    /// Value of the `Choice` field.
    Device(Device),
}

// ── Settings record ───────────────────────────────────────────────────────────

/// Configuration for one training job.
///
/// Field order matches [`SettingField::ALL`] and is the order keys appear in
/// the persisted JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory the trained model is written to.  Required for start.
    pub model_save_path: String,
    /// Model identifier, e.g. a Hugging Face repository name.  Required for start.
    pub model_name: String,
    /// Hugging Face access token.  Never echoed verbatim.
    pub hf_token: String,
    /// Fine-tune an existing model instead of training from scratch.
    pub finetune: bool,
    pub device: Device,
    /// Directory holding the training dataset.  Required for start.
    pub dataset_path: String,
    pub trust_remote_code: bool,
    pub low_cpu_mem_usage: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model_save_path: String::new(),
            model_name: String::new(),
            hf_token: String::new(),
            finetune: false,
            device: Device::Cpu,
            dataset_path: String::new(),
            trust_remote_code: false,
            low_cpu_mem_usage: true,
        }
    }
}

impl Settings {
    /// Reads one field.
    pub fn get(&self, field: SettingField) -> FieldValue {
        match field {
            SettingField::ModelSavePath => FieldValue::Text(self.model_save_path.clone()),
            SettingField::ModelName => FieldValue::Text(self.model_name.clone()),
            SettingField::HfToken => FieldValue::Text(self.hf_token.clone()),
            SettingField::Finetune => FieldValue::Flag(self.finetune),
            SettingField::Device => FieldValue::Device(self.device),
            SettingField::DatasetPath => FieldValue::Text(self.dataset_path.clone()),
            SettingField::TrustRemoteCode => FieldValue::Flag(self.trust_remote_code),
            SettingField::LowCpuMemUsage => FieldValue::Flag(self.low_cpu_mem_usage),
        }
    }

    /// Borrows the text of a `Path`, `Text` or `Secret` field.
    ///
    /// Returns `None` for flags and the device choice.
    pub fn text(&self, field: SettingField) -> Option<&str> {
        match field {
            SettingField::ModelSavePath => Some(&self.model_save_path),
            SettingField::ModelName => Some(&self.model_name),
            SettingField::HfToken => Some(&self.hf_token),
            SettingField::DatasetPath => Some(&self.dataset_path),
            SettingField::Finetune
            | SettingField::Device
            | SettingField::TrustRemoteCode
            | SettingField::LowCpuMemUsage => None,
        }
    }

    /// Writes one field.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::TypeMismatch`] if `value` does not fit the field's kind.
    pub fn set(&mut self, field: SettingField, value: FieldValue) -> Result<(), FieldError> {
        match (field, value) {
            (SettingField::ModelSavePath, FieldValue::Text(v)) => self.model_save_path = v,
            (SettingField::ModelName, FieldValue::Text(v)) => self.model_name = v,
            (SettingField::HfToken, FieldValue::Text(v)) => self.hf_token = v,
            (SettingField::DatasetPath, FieldValue::Text(v)) => self.dataset_path = v,
            (SettingField::Finetune, FieldValue::Flag(v)) => self.finetune = v,
            (SettingField::TrustRemoteCode, FieldValue::Flag(v)) => self.trust_remote_code = v,
            (SettingField::LowCpuMemUsage, FieldValue::Flag(v)) => self.low_cpu_mem_usage = v,
            (SettingField::Device, FieldValue::Device(v)) => self.device = v,
            (field, _) => {
                return Err(FieldError::TypeMismatch {
                    field,
                    expected: field.kind(),
                })
            }
        }
        tracing::trace!(field = field.key(), "setting updated");
        Ok(())
    }

    /// Parses user text for `field` and writes it.
    ///
    /// Text fields take the input verbatim.  Flags accept
    /// `true/false`, `yes/no`, `on/off` and `1/0` in any case.  The device
    /// accepts `cpu` or `gpu`.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::InvalidValue`] if the text cannot be parsed.
    pub fn set_from_str(&mut self, field: SettingField, input: &str) -> Result<(), FieldError> {
        let value = match field.kind() {
            FieldKind::Path | FieldKind::Text | FieldKind::Secret => {
                FieldValue::Text(input.to_string())
            }
            FieldKind::Flag => FieldValue::Flag(parse_flag(input).ok_or_else(|| {
                FieldError::InvalidValue {
                    field,
                    value: input.to_string(),
                    reason: "expected true or false".to_string(),
                }
            })?),
            FieldKind::Choice => {
                let device = input.parse::<Device>().map_err(|e| FieldError::InvalidValue {
                    field,
                    value: input.to_string(),
                    reason: e.to_string(),
                })?;
                FieldValue::Device(device)
            }
        };
        self.set(field, value)
    }

    /// Renders a field for the console, masking a non-empty secret.
    pub fn display_value(&self, field: SettingField) -> String {
        match self.get(field) {
            FieldValue::Text(v) if field.kind() == FieldKind::Secret && !v.is_empty() => {
                SECRET_MASK.to_string()
            }
            FieldValue::Text(v) => v,
            FieldValue::Flag(v) => v.to_string(),
            FieldValue::Device(v) => v.to_string(),
        }
    }
}

fn parse_flag(input: &str) -> Option<bool> {
    match input.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── Defaults ──────────────────────────────────────────────────────────────

    #[test]
    fn test_default_settings_match_documented_defaults() {
        // Arrange / Act
        let s = Settings::default();

        // Assert
        assert_eq!(s.model_save_path, "");
        assert_eq!(s.model_name, "");
        assert_eq!(s.hf_token, "");
        assert!(!s.finetune);
        assert_eq!(s.device, Device::Cpu);
        assert_eq!(s.dataset_path, "");
        assert!(!s.trust_remote_code);
        assert!(s.low_cpu_mem_usage);
    }

    // ── JSON shape ────────────────────────────────────────────────────────────

    #[test]
    fn test_serialized_record_has_all_eight_keys_in_order() {
        // Arrange
        let s = Settings::default();

        // Act
        let json = serde_json::to_string(&s).expect("serialize");

        // Assert
        let mut last = 0;
        for field in SettingField::ALL {
            let pos = json
                .find(&format!("\"{}\"", field.key()))
                .unwrap_or_else(|| panic!("missing key {}", field.key()));
            assert!(pos >= last, "key {} out of order", field.key());
            last = pos;
        }
    }

    #[test]
    fn test_device_serializes_as_lowercase_string() {
        let mut s = Settings::default();
        s.device = Device::Gpu;
        let value = serde_json::to_value(&s).unwrap();
        assert_eq!(value["device"], "gpu");
        assert_eq!(value["low_cpu_mem_usage"], true);
    }

    #[test]
    fn test_partial_record_keeps_defaults_for_missing_keys() {
        // Act
        let s: Settings = serde_json::from_str(r#"{"model_name": "X"}"#).expect("partial");

        // Assert
        let mut expected = Settings::default();
        expected.model_name = "X".to_string();
        assert_eq!(s, expected);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let s: Settings =
            serde_json::from_str(r#"{"model_name": "m", "epochs": 3}"#).expect("unknown key");
        assert_eq!(s.model_name, "m");
    }

    #[test]
    fn test_out_of_enum_device_is_rejected() {
        let result: Result<Settings, _> = serde_json::from_str(r#"{"device": "tpu"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_wrongly_typed_flag_is_rejected() {
        let result: Result<Settings, _> = serde_json::from_str(r#"{"finetune": "yes"}"#);
        assert!(result.is_err());
    }

    // ── Device parsing ────────────────────────────────────────────────────────

    #[test]
    fn test_device_from_str_is_case_insensitive() {
        assert_eq!("GPU".parse::<Device>(), Ok(Device::Gpu));
        assert_eq!(" cpu ".parse::<Device>(), Ok(Device::Cpu));
    }

    #[test]
    fn test_device_from_str_rejects_other_values() {
        assert_eq!(
            "cuda".parse::<Device>(),
            Err(ParseDeviceError("cuda".to_string()))
        );
    }

    // ── Field binding ─────────────────────────────────────────────────────────

    #[test]
    fn test_set_then_get_returns_value() {
        // Arrange
        let mut s = Settings::default();

        // Act
        s.set(SettingField::ModelName, FieldValue::Text("gpt2".into()))
            .unwrap();
        s.set(SettingField::Finetune, FieldValue::Flag(true)).unwrap();
        s.set(SettingField::Device, FieldValue::Device(Device::Gpu))
            .unwrap();

        // Assert
        assert_eq!(
            s.get(SettingField::ModelName),
            FieldValue::Text("gpt2".into())
        );
        assert_eq!(s.get(SettingField::Finetune), FieldValue::Flag(true));
        assert_eq!(s.get(SettingField::Device), FieldValue::Device(Device::Gpu));
    }

    #[test]
    fn test_set_rejects_mismatched_value_kind() {
        let mut s = Settings::default();
        let result = s.set(SettingField::Finetune, FieldValue::Text("true".into()));
        assert_eq!(
            result,
            Err(FieldError::TypeMismatch {
                field: SettingField::Finetune,
                expected: FieldKind::Flag,
            })
        );
        assert!(!s.finetune, "failed set must not modify the record");
    }

    #[test]
    fn test_set_from_str_parses_flag_spellings() {
        let mut s = Settings::default();
        for (input, expected) in [("yes", true), ("OFF", false), ("1", true), ("false", false)] {
            s.set_from_str(SettingField::TrustRemoteCode, input).unwrap();
            assert_eq!(s.trust_remote_code, expected, "input {input:?}");
        }
    }

    #[test]
    fn test_set_from_str_rejects_bad_flag() {
        let mut s = Settings::default();
        let err = s
            .set_from_str(SettingField::LowCpuMemUsage, "maybe")
            .unwrap_err();
        assert!(matches!(err, FieldError::InvalidValue { .. }));
        assert!(s.low_cpu_mem_usage);
    }

    #[test]
    fn test_set_from_str_rejects_unknown_device() {
        let mut s = Settings::default();
        let err = s.set_from_str(SettingField::Device, "tpu").unwrap_err();
        assert!(err.to_string().contains("tpu"));
        assert_eq!(s.device, Device::Cpu);
    }

    #[test]
    fn test_text_returns_none_for_non_text_fields() {
        let s = Settings::default();
        assert_eq!(s.text(SettingField::ModelName), Some(""));
        assert_eq!(s.text(SettingField::Device), None);
        assert_eq!(s.text(SettingField::Finetune), None);
    }

    // ── Display ───────────────────────────────────────────────────────────────

    #[test]
    fn test_display_value_masks_non_empty_token() {
        let mut s = Settings::default();
        s.hf_token = "hf_abcdef".to_string();
        assert_eq!(s.display_value(SettingField::HfToken), SECRET_MASK);
    }

    #[test]
    fn test_display_value_shows_empty_token_as_empty() {
        let s = Settings::default();
        assert_eq!(s.display_value(SettingField::HfToken), "");
    }

    #[test]
    fn test_display_value_renders_flags_and_device() {
        let s = Settings::default();
        assert_eq!(s.display_value(SettingField::LowCpuMemUsage), "true");
        assert_eq!(s.display_value(SettingField::Device), "cpu");
    }
}

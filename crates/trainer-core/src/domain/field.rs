//! Static table of the eight setting fields.
//!
//! Every place that needs to refer to "a field of the settings record" by
//! name (the persisted JSON key, a form label, the command line, the
//! validation report) goes through [`SettingField`].  There is no
//! string-keyed access anywhere else in the codebase: a typo in a field name
//! is a compile error, and a typo in user input is a [`FieldError`].
//!
//! # Declaration order
//!
//! [`SettingField::ALL`] lists the fields in the same order as the persisted
//! record.  That order is observable: the console echoes the configuration
//! field by field in this order, and the validation report lists missing
//! fields in this order.

use std::fmt;
use std::str::FromStr;

use super::settings::FieldError;

/// What kind of value a field holds, and therefore which form control binds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// A file-system path, editable as text or filled by a directory picker.
    Path,
    /// Free text.
    Text,
    /// Free text that must never be echoed back verbatim.
    Secret,
    /// A boolean toggle.
    Flag,
    /// The two-valued exclusive device choice.
    Choice,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Path => "path",
            FieldKind::Text => "text",
            FieldKind::Secret => "secret",
            FieldKind::Flag => "boolean",
            FieldKind::Choice => "device",
        };
        f.write_str(name)
    }
}

/// One field of the [`Settings`](super::settings::Settings) record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SettingField {
    ModelSavePath,
    ModelName,
    HfToken,
    Finetune,
    Device,
    DatasetPath,
    TrustRemoteCode,
    LowCpuMemUsage,
}

impl SettingField {
    /// All fields in declaration order.
    pub const ALL: [SettingField; 8] = [
        SettingField::ModelSavePath,
        SettingField::ModelName,
        SettingField::HfToken,
        SettingField::Finetune,
        SettingField::Device,
        SettingField::DatasetPath,
        SettingField::TrustRemoteCode,
        SettingField::LowCpuMemUsage,
    ];

    /// Fields that must be non-empty before training may start, in report order.
    pub const REQUIRED: [SettingField; 3] = [
        SettingField::ModelSavePath,
        SettingField::ModelName,
        SettingField::DatasetPath,
    ];

    /// The key used in `settings.json` and in console output.
    pub fn key(self) -> &'static str {
        match self {
            SettingField::ModelSavePath => "model_save_path",
            SettingField::ModelName => "model_name",
            SettingField::HfToken => "hf_token",
            SettingField::Finetune => "finetune",
            SettingField::Device => "device",
            SettingField::DatasetPath => "dataset_path",
            SettingField::TrustRemoteCode => "trust_remote_code",
            SettingField::LowCpuMemUsage => "low_cpu_mem_usage",
        }
    }

    /// Human-readable label for a form control.
    pub fn label(self) -> &'static str {
        match self {
            SettingField::ModelSavePath => "Model Save Path",
            SettingField::ModelName => "Model Name",
            SettingField::HfToken => "Hugging Face Token",
            SettingField::Finetune => "Finetune Model",
            SettingField::Device => "Device",
            SettingField::DatasetPath => "Dataset Path",
            SettingField::TrustRemoteCode => "Trust Remote Code",
            SettingField::LowCpuMemUsage => "Low CPU Memory Usage",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            SettingField::ModelSavePath | SettingField::DatasetPath => FieldKind::Path,
            SettingField::ModelName => FieldKind::Text,
            SettingField::HfToken => FieldKind::Secret,
            SettingField::Finetune
            | SettingField::TrustRemoteCode
            | SettingField::LowCpuMemUsage => FieldKind::Flag,
            SettingField::Device => FieldKind::Choice,
        }
    }

    /// Returns `true` if the field must be non-empty for a start request.
    pub fn is_required(self) -> bool {
        Self::REQUIRED.contains(&self)
    }
}

impl fmt::Display for SettingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SettingField {
    type Err = FieldError;

    /// Parses a persisted key (`"model_name"`).  Dashes are accepted in place
    /// of underscores so command-line spellings like `model-name` work too.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|field| field.key() == normalized)
            .ok_or_else(|| FieldError::UnknownField(s.to_string()))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

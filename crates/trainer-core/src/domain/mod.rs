//! Domain entities for the training console.
//!
//! This module contains pure business logic with no infrastructure
//! dependencies: no file I/O, no clock reads outside log stamping, no UI.
//!
//! Code in outer layers (storage, session orchestration, the command-line
//! driver) depends on the domain, but the domain never depends on them.

/// The eight setting fields, their keys, labels and kinds.
pub mod field;
/// The settings record, its defaults, and typed field access.
pub mod settings;
/// Required-field rule for start requests.
pub mod validation;

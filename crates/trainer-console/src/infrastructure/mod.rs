//! Infrastructure layer for the training console.
//!
//! Contains the adapters that touch the outside world: the settings file,
//! the in-memory console, and the presentation command bridge.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `trainer_core`, but MUST NOT be imported by the `application` or domain layers.

pub mod console;
pub mod storage;
pub mod ui_bridge;

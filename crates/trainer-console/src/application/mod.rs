//! Application layer use cases for the training console.
//!
//! # What is the "application" layer? (for beginners)
//!
//! In Clean Architecture the *application* layer sits between the domain
//! (pure business rules) and the infrastructure (file system, terminal).
//!
//! Use cases in this layer:
//!
//! - **Orchestrate** domain objects to fulfil a user goal (e.g., "save the
//!   form and tell the user whether it worked").
//! - **Depend on abstractions** (traits) rather than concrete implementations,
//!   so the infrastructure can be swapped without changing this code.
//! - **Contain no file-system access of their own**.
//!
//! # Sub-modules
//!
//! - **`session`** – The `SessionController`: load, save, start and clear,
//!   each reporting its outcome through the console log.

pub mod session;

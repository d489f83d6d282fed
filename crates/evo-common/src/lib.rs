//! Shared types for Evo.
//!
//! Holds the error taxonomy used across the workspace. Each crate defines
//! errors close to where they occur; this crate provides the common ones
//! (settings, persistence) and the top-level `EvoError` wrapper.

pub mod errors;

pub use errors::{ConfigError, EvoError, PersistenceError};

pub type Result<T> = std::result::Result<T, EvoError>;

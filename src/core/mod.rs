//! Core types shared across relsync.
//!
//! Currently this is the error system: the [`SyncError`] taxonomy and the
//! user-facing [`ErrorContext`] wrapper used at the top level of the CLI.

pub mod error;

pub use error::{ErrorContext, SyncError, user_friendly_error};

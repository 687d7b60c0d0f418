//! Shared utilities: file system helpers and progress display.

pub mod fs;
pub mod progress;

//! Integration test suite for relsync
//!
//! Binary-level tests exercising argument parsing, manifest handling, and
//! the offline command paths (`check`, configuration errors). Network and
//! probe-launcher behavior is covered by the unit tests next to the code,
//! where fake launchers can be injected.
//!
//! # Running
//!
//! ```bash
//! cargo test --test integration
//! ```

mod cli;

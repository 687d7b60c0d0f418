//! relsync - GitHub release artifact synchronizer
//!
//! Keeps a locally installed versioned artifact (and its companion plugin
//! artifacts) in sync with a tagged GitHub release. A run first asks the
//! installed artifact what version it is; only when the answer is missing,
//! stale, or inconclusive does it resolve the release, download the assets
//! the local cache cannot provide, and reinstall the destination.
//!
//! # Flow
//!
//! ```text
//! probe installed version
//!   ├── up to date  → done, nothing fetched
//!   └── stale/failed → resolve release by tag
//!                       → select primary + plugin assets
//!                       → fetch each (cache-or-download, plugins serially)
//!                       → clear destination, copy files in concurrently
//! ```
//!
//! # Design points
//!
//! - **Cache validity is byte-size equality.** A cached file is reused iff
//!   its size matches the release metadata exactly; there are no checksums
//!   and no proactive invalidation.
//! - **Probe failure is recoverable.** The version check writing to stderr
//!   triggers an unconditional update with a warning, never a hard failure.
//! - **Everything else fails fast.** No retries, no rollback of a partial
//!   install; the tool is meant to be re-run to completion.
//!
//! # Core Modules
//!
//! - [`cli`] - command-line interface (`sync`, `check`)
//! - [`config`] - targets manifest and workspace layout
//! - [`core`] - the `SyncError` taxonomy and user-facing error display
//! - [`github`] - release resolution and asset selection
//! - [`fetcher`] - cache-or-download asset acquisition
//! - [`probe`] - installed-artifact version probing
//! - [`sync`] - the orchestrator sequencing a full run

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod fetcher;
pub mod github;
pub mod probe;
pub mod sync;
pub mod utils;

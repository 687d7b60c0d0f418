//! Command-line interface for relsync.
//!
//! Two commands:
//! - `sync` — bring the installed artifact and its plugins in line with the
//!   configured release tag, downloading whatever the cache cannot provide.
//! - `check` — run only the version probe and report whether the installed
//!   artifact matches the configured tag, without touching the network.
//!
//! Global flags control verbosity, progress display, the manifest path, and
//! the workspace root. Flags are translated once into a [`CliConfig`] that is
//! applied to the environment before any command runs.

pub mod check;
pub mod sync;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::constants::{DEFAULT_MANIFEST, NO_PROGRESS_ENV};

/// Top-level CLI for relsync.
#[derive(Parser)]
#[command(
    name = "relsync",
    about = "Keep a locally installed release artifact and its plugins in sync with a tagged GitHub release",
    version,
    author
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (equivalent to RUST_LOG=debug).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Disable download progress bars (automatic in non-TTY environments).
    #[arg(long, global = true)]
    no_progress: bool,

    /// Path to the targets manifest (default: versions.json).
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Workspace root directory (default: the target name).
    #[arg(long, global = true, value_name = "DIR")]
    root: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Synchronize the installed artifacts with the configured release tag
    Sync(sync::SyncArgs),
    /// Check whether the installed artifact matches the configured tag
    Check(check::CheckArgs),
}

/// Runtime configuration derived from the global CLI flags.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log level for `RUST_LOG`; `None` means errors only.
    pub log_level: Option<String>,
    /// Whether to disable progress indicators.
    pub no_progress: bool,
}

impl CliConfig {
    /// Apply the configuration to the process environment.
    ///
    /// An already-set `RUST_LOG` wins over the flag-derived level.
    pub fn apply_to_env(&self) {
        // SAFETY: called once from the single-threaded CLI entry point,
        // before any other thread is spawned.
        if self.no_progress {
            unsafe { std::env::set_var(NO_PROGRESS_ENV, "1") };
        }

        if let Some(level) = &self.log_level {
            if std::env::var_os("RUST_LOG").is_none() {
                unsafe { std::env::set_var("RUST_LOG", level) };
            }
        }
    }

    /// Install the global tracing subscriber according to `RUST_LOG`.
    pub fn init_tracing(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .without_time()
            .try_init();
    }
}

impl Cli {
    /// Translate the global flags into a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            None
        } else {
            Some("info".to_string())
        };

        CliConfig { log_level, no_progress: self.no_progress }
    }

    /// Execute the parsed command.
    ///
    /// # Errors
    ///
    /// Propagates the command's failure for top-level display.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        config.apply_to_env();
        config.init_tracing();

        let manifest_path =
            self.config.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_MANIFEST));

        match self.command {
            Commands::Sync(cmd) => cmd.execute(&manifest_path, self.root).await,
            Commands::Check(cmd) => cmd.execute(&manifest_path, self.root).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_maps_to_debug_level() {
        let cli = Cli::parse_from(["relsync", "--verbose", "sync"]);
        assert_eq!(cli.build_config().log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn quiet_disables_logging() {
        let cli = Cli::parse_from(["relsync", "--quiet", "sync"]);
        assert!(cli.build_config().log_level.is_none());
    }

    #[test]
    fn default_level_is_info() {
        let cli = Cli::parse_from(["relsync", "sync"]);
        assert_eq!(cli.build_config().log_level.as_deref(), Some("info"));
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["relsync", "-v", "-q", "sync"]).is_err());
    }

    #[test]
    fn target_name_is_accepted_by_subcommands() {
        assert!(Cli::try_parse_from(["relsync", "sync", "quasar"]).is_ok());
        assert!(Cli::try_parse_from(["relsync", "check", "quasar"]).is_ok());
    }
}

//! The synchronization orchestrator.
//!
//! [`Synchronizer::run`] drives one target through the phase sequence
//!
//! ```text
//! Probing → {UpToDate | Resolving} → Selecting → FetchingPrimary
//!         → FetchingPlugins → Installing → Done
//! ```
//!
//! with an error path from any phase to failure. The flow is a linear chain
//! of awaited steps; the only concurrency is inside the install step, whose
//! file copies are independent. Plugin fetches are strictly sequential so
//! bandwidth stays bounded and the cache fills in a deterministic order.
//!
//! A probe rejection is the single locally recovered error: the reason is
//! logged as a warning and the update proceeds unconditionally. Every other
//! failure propagates; the resolve path is already the last resort, so there
//! is no further fallback behind it. There are no timeouts — a hung network
//! or subprocess call blocks the run, a known limitation.

pub mod install;

use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::config::{ReleaseTarget, Workspace};
use crate::core::SyncError;
use crate::fetcher;
use crate::github::{GithubClient, select_plugins, select_primary};
use crate::probe::VersionProbe;

/// The phases a sync run moves through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    /// Checking the installed artifact's version.
    Probing,
    /// Fetching release metadata for the configured tag.
    Resolving,
    /// Partitioning the asset list into primary and plugins.
    Selecting,
    /// Acquiring the primary artifact.
    FetchingPrimary,
    /// Acquiring plugin artifacts, one at a time.
    FetchingPlugins,
    /// Clearing and repopulating the destination.
    Installing,
}

impl fmt::Display for SyncPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Probing => "probing",
            Self::Resolving => "resolving",
            Self::Selecting => "selecting",
            Self::FetchingPrimary => "fetching primary",
            Self::FetchingPlugins => "fetching plugins",
            Self::Installing => "installing",
        };
        f.write_str(name)
    }
}

/// Terminal result of a successful sync run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The installed artifact already matches the target tag; nothing was
    /// fetched.
    UpToDate {
        /// The tag that was verified.
        tag: String,
    },
    /// Artifacts for the target tag were downloaded (or reused from cache)
    /// and installed.
    Updated {
        /// The tag that was installed.
        tag: String,
    },
}

impl fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UpToDate { tag } => write!(f, "Already up to date for {tag}"),
            Self::Updated { tag } => write!(f, "Updated to {tag}"),
        }
    }
}

/// Orchestrates one synchronization run for one target.
pub struct Synchronizer {
    name: String,
    target: ReleaseTarget,
    workspace: Workspace,
    client: GithubClient,
    probe: VersionProbe,
}

impl Synchronizer {
    /// Create a synchronizer for `target`, installing into `workspace`.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        target: ReleaseTarget,
        workspace: Workspace,
        client: GithubClient,
    ) -> Self {
        let probe = VersionProbe::new(&workspace, &target);
        Self { name: name.into(), target, workspace, client, probe }
    }

    /// Replace the version probe. Used by tests and by the `check` command
    /// when a custom launcher is configured.
    #[must_use]
    pub fn with_probe(mut self, probe: VersionProbe) -> Self {
        self.probe = probe;
        self
    }

    fn enter(&self, phase: SyncPhase) {
        debug!("sync phase for {}: {phase}", self.name);
    }

    /// Run the full synchronization sequence.
    ///
    /// # Errors
    ///
    /// Any [`SyncError`] other than a probe rejection propagates unchanged;
    /// nothing is retried and a partial install is not rolled back.
    pub async fn run(&self) -> Result<SyncOutcome, SyncError> {
        let tag = self.target.tag.clone();

        self.enter(SyncPhase::Probing);
        match self.probe.probe().await {
            Ok(true) => {
                info!("Existing version is up to date for {} {tag}", self.name);
                return Ok(SyncOutcome::UpToDate { tag });
            }
            Ok(false) => {
                debug!("installed artifact is missing or stale");
            }
            Err(SyncError::Probe { message }) => {
                warn!(
                    "Updating {} unconditionally, the version check failed: {message}",
                    self.name
                );
            }
            Err(other) => return Err(other),
        }

        info!("Updating {} for {tag}", self.name);

        self.enter(SyncPhase::Resolving);
        let release = self.client.fetch_release(&self.target).await?;

        self.enter(SyncPhase::Selecting);
        let primary = select_primary(&release, &self.target.prefix)?;
        let plugins = select_plugins(&release, &self.target.plugin_marker);
        debug!("selected primary {} and {} plugin(s)", primary.name, plugins.len());

        let cache_dir = self.workspace.cache_dir();

        self.enter(SyncPhase::FetchingPrimary);
        let primary_file =
            fetcher::fetch(&self.client, &self.target, primary, &cache_dir).await?;

        self.enter(SyncPhase::FetchingPlugins);
        let mut plugin_files: Vec<PathBuf> = Vec::with_capacity(plugins.len());
        for plugin in plugins {
            let file = fetcher::fetch(&self.client, &self.target, plugin, &cache_dir).await?;
            plugin_files.push(file);
        }

        self.enter(SyncPhase::Installing);
        info!("Copying files for updated version...");
        install::install(&self.workspace, &primary_file, &plugin_files).await?;

        Ok(SyncOutcome::Updated { tag })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn fixture() -> (tempfile::TempDir, Workspace, ReleaseTarget) {
        let dir = tempfile::tempdir().unwrap();
        let workspace = Workspace::new(dir.path().join("quasar"), "quasar");
        workspace.bootstrap().unwrap();
        let target = ReleaseTarget {
            owner: "relsync-test-owner".into(),
            repo: "relsync-test-repo".into(),
            tag: "v1.2.3".into(),
            prefix: "quasar-web".into(),
            plugin_marker: "plugin".into(),
        };
        (dir, workspace, target)
    }

    fn scripted_probe(workspace: &Workspace, target: &ReleaseTarget, script: &str) -> VersionProbe {
        VersionProbe::new(workspace, target)
            .with_launcher("sh", vec!["-c".to_string(), script.to_string()])
    }

    #[tokio::test]
    async fn up_to_date_probe_skips_the_network() {
        let (_dir, workspace, target) = fixture();
        std::fs::write(workspace.primary_path(), b"jar").unwrap();

        let probe = scripted_probe(&workspace, &target, "echo 'quasar 1.2.3'");
        let client = GithubClient::new(None).unwrap();
        let sync = Synchronizer::new("quasar", target, workspace, client).with_probe(probe);

        // The configured owner/repo do not exist; reaching the network would
        // fail, so a clean UpToDate proves the resolve phase never ran.
        let outcome = sync.run().await.unwrap();
        assert_eq!(outcome, SyncOutcome::UpToDate { tag: "v1.2.3".into() });
        assert_eq!(outcome.to_string(), "Already up to date for v1.2.3");
    }

    #[tokio::test]
    async fn probe_rejection_falls_through_to_resolving() {
        let (_dir, workspace, target) = fixture();
        std::fs::write(workspace.primary_path(), b"jar").unwrap();
        let installed_primary = workspace.primary_path();

        let probe = scripted_probe(&workspace, &target, "echo 'bad jar' >&2");
        let client = GithubClient::new(None).unwrap();
        let sync = Synchronizer::new("quasar", target, workspace, client).with_probe(probe);

        // The rejection is recovered and the run proceeds to the resolve
        // phase, which fails against the nonexistent repository. The failure
        // must not be a probe error, and nothing may be removed from the
        // destination on a pre-install failure.
        let err = sync.run().await.unwrap_err();
        assert!(!matches!(err, SyncError::Probe { .. }), "probe error escaped: {err:?}");
        assert!(installed_primary.exists());
    }

    #[tokio::test]
    async fn stale_version_proceeds_to_resolving() {
        let (_dir, workspace, target) = fixture();
        std::fs::write(workspace.primary_path(), b"jar").unwrap();

        let probe = scripted_probe(&workspace, &target, "echo 'quasar 0.9.0'");
        let client = GithubClient::new(None).unwrap();
        let sync = Synchronizer::new("quasar", target, workspace, client).with_probe(probe);

        assert!(sync.run().await.is_err());
    }

    #[test]
    fn phase_names_are_stable() {
        assert_eq!(SyncPhase::Probing.to_string(), "probing");
        assert_eq!(SyncPhase::FetchingPlugins.to_string(), "fetching plugins");
    }
}

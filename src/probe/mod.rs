//! Version probing of the installed artifact.
//!
//! Before touching the network, the orchestrator asks the installed primary
//! artifact what version it is: the artifact is spawned with a help flag and
//! its output scanned for the literal `"<label> <version>"` banner, where
//! the version is the numeric part of the configured tag.
//!
//! Both output streams are fully drained before any verdict is reached.
//! `output()` on the child reads stdout and stderr concurrently to EOF and
//! reaps the process, so a stderr write that lands after stdout closes can
//! never race the decision. Anything on stderr makes the probe fail with
//! that text — treated as "verification inconclusive" upstream, not as a
//! staleness answer.

use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use crate::config::{ReleaseTarget, Workspace};
use crate::constants::{PROBE_FLAG, PROBE_LAUNCHER, PROBE_LAUNCHER_ARGS};
use crate::core::SyncError;

/// Probe for the version of an installed artifact.
///
/// Built from the workspace layout and the configured target; the launcher
/// defaults to `java -jar` (artifacts are jars) and is injectable for tests
/// via [`with_launcher`](Self::with_launcher).
#[derive(Debug, Clone)]
pub struct VersionProbe {
    program: String,
    leading_args: Vec<String>,
    artifact: PathBuf,
    label: String,
    version: String,
}

impl VersionProbe {
    /// Create a probe for the artifact installed in `workspace`, expecting
    /// the version encoded in `target.tag`.
    #[must_use]
    pub fn new(workspace: &Workspace, target: &ReleaseTarget) -> Self {
        Self {
            program: PROBE_LAUNCHER.to_string(),
            leading_args: PROBE_LAUNCHER_ARGS.iter().map(ToString::to_string).collect(),
            artifact: workspace.primary_path(),
            label: workspace.primary_label().to_string(),
            version: target.version(),
        }
    }

    /// Replace the launcher program and its leading arguments.
    #[must_use]
    pub fn with_launcher(
        mut self,
        program: impl Into<String>,
        leading_args: Vec<String>,
    ) -> Self {
        self.program = program.into();
        self.leading_args = leading_args;
        self
    }

    /// Check whether the installed artifact already reports the target
    /// version.
    ///
    /// Resolves `Ok(false)` when no artifact is installed — that is a normal
    /// "needs update", not an error.
    ///
    /// # Errors
    ///
    /// [`SyncError::Probe`] when the launcher cannot be spawned or when the
    /// subprocess writes anything to stderr.
    pub async fn probe(&self) -> Result<bool, SyncError> {
        if !self.artifact.exists() {
            debug!("no installed artifact at {}", self.artifact.display());
            return Ok(false);
        }

        debug!(
            "probing {} with {} {}",
            self.artifact.display(),
            self.program,
            self.leading_args.join(" ")
        );

        let output = Command::new(&self.program)
            .args(&self.leading_args)
            .arg(&self.artifact)
            .arg(PROBE_FLAG)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| SyncError::Probe {
                message: format!("failed to launch {}: {e}", self.program),
            })?;

        if !output.stderr.is_empty() {
            return Err(SyncError::Probe {
                message: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let banner = format!("{} {}", self.label, self.version);
        debug!("looking for '{banner}' in probe output");
        Ok(stdout.contains(&banner))
    }
}

//! The `sync` command.

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::path::{Path, PathBuf};

use crate::config::{Manifest, Workspace};
use crate::github::GithubClient;
use crate::sync::Synchronizer;

/// Arguments for `relsync sync`.
#[derive(Parser, Debug)]
pub struct SyncArgs {
    /// Logical target name from the manifest.
    ///
    /// May be omitted when the manifest defines exactly one target.
    #[arg(value_name = "TARGET")]
    pub target: Option<String>,
}

impl SyncArgs {
    /// Run the synchronization flow for the selected target.
    ///
    /// Loads the manifest, bootstraps the workspace directories, and hands
    /// off to the [`Synchronizer`]. The final status line distinguishes the
    /// up-to-date and updated outcomes; failures propagate for top-level
    /// display and a non-zero exit.
    pub async fn execute(self, manifest_path: &Path, root: Option<PathBuf>) -> Result<()> {
        let manifest = Manifest::load(manifest_path)?;
        let (name, target) = manifest.select(self.target.as_deref())?;

        let root = root.unwrap_or_else(|| PathBuf::from(name));
        let workspace = Workspace::new(root, name);
        workspace.bootstrap()?;

        let client = GithubClient::from_env()?;
        let synchronizer = Synchronizer::new(name, target.clone(), workspace, client);
        let outcome = synchronizer.run().await?;

        println!("{} {outcome}", "Done!".green());
        Ok(())
    }
}

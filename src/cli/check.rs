//! The `check` command: probe the installed artifact without syncing.

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::path::{Path, PathBuf};

use crate::config::{Manifest, Workspace};
use crate::probe::VersionProbe;

/// Arguments for `relsync check`.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Logical target name from the manifest.
    ///
    /// May be omitted when the manifest defines exactly one target.
    #[arg(value_name = "TARGET")]
    pub target: Option<String>,
}

impl CheckArgs {
    /// Run only the version probe and report the verdict.
    ///
    /// Never touches the network. A probe rejection (stderr output or launch
    /// failure) propagates as an error here — unlike `sync`, there is no
    /// update path to fall back to.
    pub async fn execute(self, manifest_path: &Path, root: Option<PathBuf>) -> Result<()> {
        let manifest = Manifest::load(manifest_path)?;
        let (name, target) = manifest.select(self.target.as_deref())?;

        let root = root.unwrap_or_else(|| PathBuf::from(name));
        let workspace = Workspace::new(root, name);

        let probe = VersionProbe::new(&workspace, target);
        if probe.probe().await? {
            println!("{}", format!("{name} is up to date for {}", target.tag).green());
        } else {
            println!("{}", format!("{name} needs an update to {}", target.tag).yellow());
        }
        Ok(())
    }
}

//! Installation of fetched artifacts into the workspace.
//!
//! The destination is cleared and repopulated on every successful sync: the
//! plugin directory tree and the primary artifact are removed (absence
//! tolerated), the plugin directory is recreated empty, and then every cache
//! entry is copied into place. The copies touch disjoint paths and run
//! concurrently; installation only completes once all of them have.
//!
//! Between removal and repopulation the destination is transiently empty. A
//! crash in that window leaves the installation absent — accepted, because a
//! re-run recomputes everything from the (likely still cached) assets.

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::Workspace;
use crate::core::SyncError;
use crate::utils::fs::{
    copy_files_parallel, ensure_dir, remove_dir_all_if_exists, remove_file_if_exists,
};

/// Replace the installed primary artifact and plugin set with the given
/// cache entries.
///
/// `primary` and each element of `plugins` are paths into the cache; plugins
/// keep their file names at the destination.
///
/// # Errors
///
/// [`SyncError::Io`] if clearing, recreating, or any copy fails.
pub async fn install(
    workspace: &Workspace,
    primary: &Path,
    plugins: &[PathBuf],
) -> Result<(), SyncError> {
    let plugin_dir = workspace.plugin_dir();
    let primary_dest = workspace.primary_path();

    remove_dir_all_if_exists(&plugin_dir).await?;
    remove_file_if_exists(&primary_dest).await?;
    ensure_dir(&plugin_dir)?;

    let mut pairs = vec![(primary.to_path_buf(), primary_dest)];
    for plugin in plugins {
        let name = plugin
            .file_name()
            .ok_or_else(|| SyncError::Io(std::io::Error::other("plugin path has no file name")))?;
        pairs.push((plugin.clone(), plugin_dir.join(name)));
    }

    debug!("installing {} files into {}", pairs.len(), workspace.root().display());
    copy_files_parallel(&pairs).await?;
    Ok(())
}

//! File system utilities.
//!
//! Small helpers shared by the workspace bootstrap and the install step.
//! All removal helpers are idempotent: a missing path is success, since the
//! install step must tolerate a destination that was never populated.

use futures::future::try_join_all;
use std::io;
use std::path::{Path, PathBuf};

/// Create a directory (and parents) if it does not already exist.
///
/// # Errors
///
/// Fails if creation fails or if the path exists but is not a directory.
pub fn ensure_dir(path: &Path) -> io::Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    } else if !path.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("path exists but is not a directory: {}", path.display()),
        ));
    }
    Ok(())
}

/// Remove a file, treating absence as success.
pub async fn remove_file_if_exists(path: &Path) -> io::Result<()> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

/// Remove a directory tree, treating absence as success.
pub async fn remove_dir_all_if_exists(path: &Path) -> io::Result<()> {
    match tokio::fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

/// Copy multiple files concurrently.
///
/// The copies touch disjoint destination paths, so they run as one joined
/// batch; the first failure aborts the join and is returned.
pub async fn copy_files_parallel(pairs: &[(PathBuf, PathBuf)]) -> io::Result<()> {
    if pairs.is_empty() {
        return Ok(());
    }

    try_join_all(pairs.iter().map(|(src, dst)| tokio::fs::copy(src, dst))).await?;
    Ok(())
}

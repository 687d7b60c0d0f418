//! Asset acquisition with a byte-size-validated local cache.
//!
//! [`fetch`] turns an asset descriptor into a local file path, either by
//! validating an existing cache entry or by downloading the asset. A cache
//! entry is valid iff its file size equals the asset's declared size exactly;
//! there is no checksum, by design — a size collision producing a false cache
//! hit is an accepted, documented risk, and cache entries are never evicted
//! by this tool.
//!
//! Downloads take two requests: an authenticated, redirect-disabled GET of
//! the asset endpoint to obtain the storage `Location`, then an
//! unauthenticated streaming GET of that location written chunk-by-chunk
//! into the cache file. A partial file left behind by a failed download is
//! not cleaned up; the next run's size check treats it as a miss and
//! overwrites it.

use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::config::ReleaseTarget;
use crate::core::SyncError;
use crate::github::{GithubClient, ReleaseAsset};
use crate::utils::progress::DownloadBar;

/// Resolve `asset` to a local cache path, downloading it if needed.
///
/// Returns as soon as a cache entry of exactly `asset.size` bytes exists at
/// `cache_dir/<asset.name>`; the cache-hit path issues no network request at
/// all. On success the returned file has been flushed and synced to disk, so
/// it is safe to treat as a valid cache entry immediately.
///
/// # Errors
///
/// - [`SyncError::Io`] for a stat failure other than "not found", or any
///   failure writing the cache file.
/// - [`SyncError::Transport`] for network failures on either request.
/// - [`SyncError::AssetLocation`] when the asset endpoint returns no
///   redirect location.
pub async fn fetch(
    client: &GithubClient,
    target: &ReleaseTarget,
    asset: &ReleaseAsset,
    cache_dir: &Path,
) -> Result<PathBuf, SyncError> {
    let cache_path = cache_dir.join(&asset.name);

    match tokio::fs::metadata(&cache_path).await {
        Ok(meta) if meta.len() == asset.size => {
            info!("Reusing cached asset for {}", asset.name);
            return Ok(cache_path);
        }
        Ok(meta) => {
            debug!(
                "cache entry for {} is {} bytes, expected {}, re-downloading",
                asset.name,
                meta.len(),
                asset.size
            );
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(SyncError::Io(e)),
    }

    let location = client.asset_location(target, asset).await?;
    let mut response = client.open_download(&location).await?;

    let total = response.content_length().unwrap_or(asset.size);
    let bar = DownloadBar::new(&asset.name, total);

    let mut file = tokio::fs::File::create(&cache_path).await?;
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|source| SyncError::Transport { url: location.clone(), source })?
    {
        file.write_all(&chunk).await?;
        bar.inc(chunk.len() as u64);
    }

    // The path only counts as a cache entry once the bytes are on disk, not
    // merely out of the network stream.
    file.flush().await?;
    file.sync_all().await?;
    bar.finish();

    info!("Downloaded {}", asset.name);
    Ok(cache_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReleaseTarget;

    fn target() -> ReleaseTarget {
        ReleaseTarget {
            owner: "o".into(),
            repo: "r".into(),
            tag: "v1.0.0".into(),
            prefix: "p".into(),
            plugin_marker: "m".into(),
        }
    }

    #[tokio::test]
    async fn exact_size_cache_entry_is_reused_without_network() {
        let dir = tempfile::tempdir().unwrap();
        let asset = ReleaseAsset { id: 1, name: "quasar.jar".into(), size: 100 };
        std::fs::write(dir.path().join("quasar.jar"), vec![0u8; 100]).unwrap();

        // The client never sends a request on the cache-hit path, so a
        // tokenless client against a real endpoint is safe here.
        let client = GithubClient::new(None).unwrap();
        let path = fetch(&client, &target(), &asset, dir.path()).await.unwrap();

        assert_eq!(path, dir.path().join("quasar.jar"));
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 100);
    }

    #[tokio::test]
    async fn cache_path_is_keyed_by_asset_name() {
        let dir = tempfile::tempdir().unwrap();
        let asset = ReleaseAsset { id: 7, name: "plugin-a.jar".into(), size: 3 };
        std::fs::write(dir.path().join("plugin-a.jar"), b"abc").unwrap();

        let client = GithubClient::new(None).unwrap();
        let path = fetch(&client, &target(), &asset, dir.path()).await.unwrap();
        assert!(path.ends_with("plugin-a.jar"));
    }
}

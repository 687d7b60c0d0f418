//! GitHub release integration.
//!
//! Everything relsync needs from the GitHub API: the release metadata types,
//! the authenticated [`GithubClient`] that resolves a tag to its asset list
//! and asset ids to download locations, and the asset selector that
//! partitions a release into the primary artifact and its plugins.
//!
//! The API surface used is deliberately small:
//!
//! - `GET /repos/{owner}/{repo}/releases/tags/{tag}` → JSON with an `assets`
//!   array of `{id, name, size}` entries.
//! - `GET /repos/{owner}/{repo}/releases/assets/{id}` with
//!   `Accept: application/octet-stream` → a redirect whose `Location` header
//!   points at the storage backend. The redirect target is fetched without
//!   authentication; GitHub's storage expects the credential to be dropped.

pub mod client;
pub mod selector;

use serde::Deserialize;

pub use client::GithubClient;
pub use selector::{name_matches, select_plugins, select_primary};

/// Release metadata for one tag: the ordered asset list.
///
/// Produced by [`GithubClient::fetch_release`] and read-only afterward.
/// Fields beyond `assets` are ignored during deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    /// Downloadable artifacts, in the order the release publishes them.
    pub assets: Vec<ReleaseAsset>,
}

/// One downloadable artifact within a release.
///
/// `id` is unique within a release and addresses the asset on the API;
/// `size` is the exact byte count used to validate cache entries.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ReleaseAsset {
    /// Asset id, unique within the release.
    pub id: u64,
    /// Asset file name.
    pub name: String,
    /// Asset size in bytes.
    pub size: u64,
}

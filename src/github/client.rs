//! HTTP client for the GitHub API.

use anyhow::{Context, Result};
use reqwest::header::{ACCEPT, AUTHORIZATION, LOCATION};
use tracing::debug;

use super::{Release, ReleaseAsset};
use crate::config::ReleaseTarget;
use crate::constants::{GITHUB_API_BASE, TOKEN_ENV, USER_AGENT};
use crate::core::SyncError;

/// Authenticated GitHub API client.
///
/// Holds three underlying clients: the default one for API calls, one with
/// redirects disabled for the asset endpoint (its redirect `Location` is
/// read manually), and a bare one for the storage-backend download, which
/// must not carry the Authorization header. The bearer token, when present,
/// is attached as `Authorization: token <value>` alongside a fixed
/// `User-Agent` on every API call.
pub struct GithubClient {
    api: reqwest::Client,
    no_redirect: reqwest::Client,
    download: reqwest::Client,
    token: Option<String>,
}

impl GithubClient {
    /// Build a client with an explicit token.
    ///
    /// # Errors
    ///
    /// Fails only if the underlying TLS/connector stack cannot initialize.
    pub fn new(token: Option<String>) -> Result<Self> {
        let api = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("failed to build HTTP client")?;
        let no_redirect = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .context("failed to build HTTP client")?;
        let download = reqwest::Client::builder()
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self { api, no_redirect, download, token })
    }

    /// Build a client using the token from `GITHUB_AUTH_TOKEN`, if set.
    pub fn from_env() -> Result<Self> {
        let token = std::env::var(TOKEN_ENV).ok();
        if token.is_none() {
            debug!("{TOKEN_ENV} not set, issuing unauthenticated API calls");
        }
        Self::new(token)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.header(AUTHORIZATION, format!("token {token}")),
            None => request,
        }
    }

    /// Resolve a target to its release metadata.
    ///
    /// Issues one authenticated GET to the releases-by-tag endpoint and
    /// parses the full body as JSON. No retries: a single failure propagates.
    ///
    /// # Errors
    ///
    /// [`SyncError::Transport`] on any network-level failure,
    /// [`SyncError::ReleaseParse`] when the body is not the expected JSON.
    pub async fn fetch_release(&self, target: &ReleaseTarget) -> Result<Release, SyncError> {
        let url = format!(
            "{GITHUB_API_BASE}/repos/{}/{}/releases/tags/{}",
            target.owner, target.repo, target.tag
        );
        debug!("fetching release metadata from {url}");

        let response = self
            .authorize(self.api.get(&url))
            .send()
            .await
            .map_err(|source| SyncError::Transport { url: url.clone(), source })?;

        let body = response
            .text()
            .await
            .map_err(|source| SyncError::Transport { url: url.clone(), source })?;

        serde_json::from_str(&body).map_err(|source| SyncError::ReleaseParse { source })
    }

    /// Resolve an asset id to the storage-backend URL serving its content.
    ///
    /// The asset endpoint answers an octet-stream request with a redirect;
    /// only the `Location` header is consumed, never the body.
    ///
    /// # Errors
    ///
    /// [`SyncError::Transport`] on network failure,
    /// [`SyncError::AssetLocation`] when the redirect location is absent.
    pub async fn asset_location(
        &self,
        target: &ReleaseTarget,
        asset: &ReleaseAsset,
    ) -> Result<String, SyncError> {
        let url = format!(
            "{GITHUB_API_BASE}/repos/{}/{}/releases/assets/{}",
            target.owner, target.repo, asset.id
        );
        debug!("resolving download location for {} via {url}", asset.name);

        let response = self
            .authorize(self.no_redirect.get(&url))
            .header(ACCEPT, "application/octet-stream")
            .send()
            .await
            .map_err(|source| SyncError::Transport { url: url.clone(), source })?;

        response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| SyncError::AssetLocation { asset: asset.name.clone() })
    }

    /// Open a streaming, unauthenticated GET of a resolved asset location.
    ///
    /// # Errors
    ///
    /// [`SyncError::Transport`] on network failure.
    pub async fn open_download(&self, location: &str) -> Result<reqwest::Response, SyncError> {
        self.download
            .get(location)
            .send()
            .await
            .map_err(|source| SyncError::Transport { url: location.to_string(), source })
    }
}

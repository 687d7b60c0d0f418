//! Shared constants for relsync.
//!
//! Centralizes the GitHub endpoints, credential/env-var names, and the
//! handful of literals the deployment depends on so they are defined in
//! exactly one place.

/// Base URL for all GitHub API requests.
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// User-Agent sent on every GitHub API call. GitHub rejects requests
/// without one.
pub const USER_AGENT: &str = "GitHubAPI";

/// Environment variable holding the GitHub bearer token.
pub const TOKEN_ENV: &str = "GITHUB_AUTH_TOKEN";

/// Default manifest file describing the sync targets.
pub const DEFAULT_MANIFEST: &str = "versions.json";

/// Environment variable that disables progress bars when set.
pub const NO_PROGRESS_ENV: &str = "RELSYNC_NO_PROGRESS";

/// Launcher used to invoke installed jar artifacts during version probes.
pub const PROBE_LAUNCHER: &str = "java";

/// Leading launcher arguments placed before the artifact path.
pub const PROBE_LAUNCHER_ARGS: &[&str] = &["-jar"];

/// Flag passed to the installed artifact to make it print its version.
pub const PROBE_FLAG: &str = "--help";

/// Maximum progress-bar redraws per second during downloads. Two per
/// second keeps fast links from flooding the terminal.
pub const PROGRESS_REDRAW_HZ: u8 = 2;

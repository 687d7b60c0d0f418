//! Error handling for relsync.
//!
//! The error system follows two principles:
//! 1. **Strongly-typed errors** ([`SyncError`]) for precise handling in code,
//!    in particular so the orchestrator can recover from probe failures while
//!    letting everything else propagate.
//! 2. **User-friendly messages** with actionable suggestions for CLI users,
//!    produced by [`user_friendly_error`] and rendered by [`ErrorContext`].
//!
//! # Taxonomy
//!
//! - [`SyncError::Probe`] — the installed artifact wrote to stderr or could
//!   not be launched. This is the only error the orchestrator recovers from:
//!   it falls back to an unconditional update.
//! - [`SyncError::Transport`] — network-level failure on any GitHub call.
//! - [`SyncError::ReleaseParse`] — release metadata was not valid JSON.
//! - [`SyncError::AssetLocation`] — the asset endpoint returned no redirect
//!   location, meaning the release metadata disagrees with the server.
//! - [`SyncError::NoPrimaryAsset`] — no asset name matched the configured
//!   prefix; a configuration or release-publishing mistake.
//! - [`SyncError::Io`] — unexpected stat/copy/stream failure.
//! - Configuration variants for a missing/malformed manifest or an unknown
//!   target name.
//!
//! Common underlying errors convert automatically:
//! [`std::io::Error`] → [`SyncError::Io`].

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for relsync operations.
///
/// Each variant represents one failure mode of the synchronization flow and
/// carries the context needed to explain it to the user.
#[derive(Error, Debug)]
pub enum SyncError {
    /// The installed artifact's version probe failed.
    ///
    /// Raised when the probe subprocess writes anything to stderr, or when it
    /// cannot be launched at all. Treated as "verification inconclusive", not
    /// as a definitive staleness answer: the orchestrator logs the message as
    /// a warning and proceeds with an unconditional update.
    #[error("version probe failed: {message}")]
    Probe {
        /// The subprocess stderr text, or the launch failure description.
        message: String,
    },

    /// A network-level failure on a GitHub request.
    #[error("request to {url} failed")]
    Transport {
        /// The URL that was being fetched.
        url: String,
        /// The underlying client error.
        #[source]
        source: reqwest::Error,
    },

    /// Release metadata was not valid JSON.
    #[error("failed to parse release metadata")]
    ReleaseParse {
        /// The underlying JSON parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The asset endpoint responded without a redirect `Location` header.
    ///
    /// GitHub serves asset content through a redirect to its storage backend;
    /// a missing location means the release metadata is inconsistent with the
    /// server state.
    #[error("no download location returned for asset '{asset}'")]
    AssetLocation {
        /// The asset name whose location was missing.
        asset: String,
    },

    /// No release asset name contained the configured primary prefix.
    #[error("no primary asset found matching prefix '{prefix}'")]
    NoPrimaryAsset {
        /// The prefix that matched nothing.
        prefix: String,
    },

    /// An unexpected filesystem failure (stat, copy, or stream write).
    #[error("filesystem error: {0}")]
    Io(#[from] std::io::Error),

    /// The manifest file does not exist.
    #[error("manifest not found: {path}")]
    ConfigNotFound {
        /// The path that was searched.
        path: String,
    },

    /// The manifest file exists but is not valid JSON.
    #[error("failed to parse manifest {path}")]
    ConfigParse {
        /// The manifest path.
        path: String,
        /// The underlying JSON parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The requested target name is not defined in the manifest.
    #[error("target '{name}' is not defined in the manifest")]
    TargetNotFound {
        /// The logical target name that was requested.
        name: String,
    },
}

/// Error wrapper that adds user-facing details and suggestions.
///
/// Rendered to stderr by [`ErrorContext::display`] with the error in red,
/// optional details in yellow, and an optional suggestion in green.
#[derive(Debug)]
pub struct ErrorContext {
    /// The rendered error message.
    pub message: String,
    /// Optional suggestion for resolving the error.
    pub suggestion: Option<String>,
    /// Optional additional details about the error.
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a context carrying just the error message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), suggestion: None, details: None }
    }

    /// Add an actionable suggestion, shown in green.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add explanatory details, shown in yellow.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error, details, and suggestion to stderr with colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.message);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

/// Convert any error into a user-friendly [`ErrorContext`].
///
/// Recognizes [`SyncError`] variants and attaches tailored suggestions;
/// everything else is rendered with its full anyhow context chain.
#[must_use]
pub fn user_friendly_error(error: &anyhow::Error) -> ErrorContext {
    if let Some(sync_error) = error.downcast_ref::<SyncError>() {
        return sync_error_context(sync_error);
    }

    ErrorContext::new(format!("{error:#}"))
}

fn sync_error_context(error: &SyncError) -> ErrorContext {
    let ctx = ErrorContext::new(error.to_string());

    match error {
        SyncError::Probe { .. } => ctx
            .with_details("the installed artifact wrote to stderr during the version check")
            .with_suggestion("check that the probe launcher is installed and on PATH"),
        SyncError::Transport { source, .. } => ctx
            .with_details(format!("{source}"))
            .with_suggestion("check network connectivity and GitHub availability"),
        SyncError::ReleaseParse { source } => ctx
            .with_details(format!("{source}"))
            .with_suggestion(
                "verify the owner/repo/tag in the manifest exist and the token has access",
            ),
        SyncError::AssetLocation { .. } => {
            ctx.with_details("the release metadata is inconsistent with the server state")
        }
        SyncError::NoPrimaryAsset { prefix } => ctx.with_suggestion(format!(
            "check that the release publishes an asset whose name contains '{prefix}'"
        )),
        SyncError::ConfigNotFound { .. } => {
            ctx.with_suggestion("create a versions.json manifest or pass --config <path>")
        }
        SyncError::ConfigParse { .. } => ctx.with_suggestion(
            "each target needs owner, repo, tag, prefix and plugin-string fields",
        ),
        SyncError::TargetNotFound { .. } => {
            ctx.with_suggestion("pass one of the target names defined in the manifest")
        }
        SyncError::Io(_) => ctx,
    }
}

//! Configuration for relsync.
//!
//! Configuration comes from a JSON manifest (by default `versions.json`)
//! mapping logical target names to release coordinates:
//!
//! ```json
//! {
//!   "quasar": {
//!     "owner": "quasar-analytics",
//!     "repo": "quasar",
//!     "tag": "v1.2.3",
//!     "prefix": "quasar-web",
//!     "plugin-string": "plugin"
//!   }
//! }
//! ```
//!
//! The manifest is read exactly once at startup and the resulting
//! [`ReleaseTarget`] is passed explicitly to every component; nothing re-reads
//! configuration during a run.
//!
//! [`Workspace`] derives the on-disk layout for a target: a root directory
//! holding `cache/`, the installed primary artifact, and a `plugins/`
//! directory with one file per installed plugin.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::core::SyncError;
use crate::utils::fs::ensure_dir;

/// Identifies exactly one GitHub release to synchronize to.
///
/// Immutable once loaded from the manifest.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ReleaseTarget {
    /// Repository owner (user or organization).
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Release tag, e.g. `v1.2.3`.
    pub tag: String,
    /// Substring identifying the single primary asset.
    pub prefix: String,
    /// Substring identifying plugin assets.
    #[serde(rename = "plugin-string")]
    pub plugin_marker: String,
}

impl ReleaseTarget {
    /// The numeric version encoded in the tag.
    ///
    /// Strips a leading `v` and every character that is neither a digit nor a
    /// dot, so `v1.2.3` and `v1.2.3-beta` both yield `1.2.3`. This is the
    /// literal the version probe looks for in the installed artifact's
    /// output.
    #[must_use]
    pub fn version(&self) -> String {
        self.tag
            .trim_start_matches('v')
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.')
            .collect()
    }
}

/// The parsed manifest: logical target name → [`ReleaseTarget`].
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    targets: BTreeMap<String, ReleaseTarget>,
}

impl Manifest {
    /// Load and parse the manifest at `path`.
    ///
    /// # Errors
    ///
    /// [`SyncError::ConfigNotFound`] if the file does not exist,
    /// [`SyncError::ConfigParse`] if it is not valid JSON, and
    /// [`SyncError::Io`] for any other read failure.
    pub fn load(path: &Path) -> Result<Self, SyncError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SyncError::ConfigNotFound { path: path.display().to_string() }
            } else {
                SyncError::Io(e)
            }
        })?;

        serde_json::from_str(&content)
            .map_err(|source| SyncError::ConfigParse { path: path.display().to_string(), source })
    }

    /// Parse a manifest from a JSON string. Used by tests.
    pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Look up a target, falling back to the sole entry when `name` is
    /// omitted and the manifest defines exactly one.
    ///
    /// # Errors
    ///
    /// [`SyncError::TargetNotFound`] if the name is unknown, or if no name
    /// was given and the manifest is empty or ambiguous.
    pub fn select(&self, name: Option<&str>) -> Result<(&str, &ReleaseTarget), SyncError> {
        match name {
            Some(name) => self
                .targets
                .get_key_value(name)
                .map(|(k, v)| (k.as_str(), v))
                .ok_or_else(|| SyncError::TargetNotFound { name: name.to_string() }),
            None if self.targets.len() == 1 => {
                let (k, v) = self.targets.iter().next().expect("checked non-empty");
                Ok((k.as_str(), v))
            }
            None => Err(SyncError::TargetNotFound {
                name: format!("<unspecified>, defined targets: {}", self.target_names().join(", ")),
            }),
        }
    }

    /// The logical target names defined in the manifest, sorted.
    #[must_use]
    pub fn target_names(&self) -> Vec<&str> {
        self.targets.keys().map(String::as_str).collect()
    }
}

/// On-disk layout for one sync target.
///
/// Layout under the root directory:
///
/// ```text
/// <root>/
///   cache/          downloaded assets, keyed by asset name
///   <name>.jar      the installed primary artifact
///   plugins/        one file per installed plugin artifact
/// ```
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
    name: String,
}

impl Workspace {
    /// Create a workspace rooted at `root` for the target called `name`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self { root: root.into(), name: name.into() }
    }

    /// The workspace root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding cached downloads.
    #[must_use]
    pub fn cache_dir(&self) -> PathBuf {
        self.root.join("cache")
    }

    /// Path of the installed primary artifact.
    #[must_use]
    pub fn primary_path(&self) -> PathBuf {
        self.root.join(format!("{}.jar", self.name))
    }

    /// Directory holding installed plugin artifacts.
    #[must_use]
    pub fn plugin_dir(&self) -> PathBuf {
        self.root.join("plugins")
    }

    /// The label the installed artifact reports in its version banner,
    /// checked by the version probe ("<label> <version>").
    #[must_use]
    pub fn primary_label(&self) -> &str {
        &self.name
    }

    /// Make sure the root and cache directories exist.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Io`] if either directory cannot be created.
    pub fn bootstrap(&self) -> Result<(), SyncError> {
        ensure_dir(&self.root)?;
        ensure_dir(&self.cache_dir())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"{
        "quasar": {
            "owner": "quasar-analytics",
            "repo": "quasar",
            "tag": "v1.2.3",
            "prefix": "quasar-web",
            "plugin-string": "plugin"
        }
    }"#;

    fn target(tag: &str) -> ReleaseTarget {
        ReleaseTarget {
            owner: "o".into(),
            repo: "r".into(),
            tag: tag.into(),
            prefix: "p".into(),
            plugin_marker: "m".into(),
        }
    }

    #[test]
    fn version_strips_leading_v() {
        assert_eq!(target("v1.2.3").version(), "1.2.3");
    }

    #[test]
    fn version_passes_through_bare_numbers() {
        assert_eq!(target("1.2.3").version(), "1.2.3");
    }

    #[test]
    fn version_drops_non_numeric_suffix() {
        assert_eq!(target("v1.2.3-beta").version(), "1.2.3");
    }

    #[test]
    fn manifest_parses_plugin_string_key() {
        let manifest = Manifest::parse(MANIFEST).unwrap();
        let (name, target) = manifest.select(Some("quasar")).unwrap();
        assert_eq!(name, "quasar");
        assert_eq!(target.plugin_marker, "plugin");
        assert_eq!(target.prefix, "quasar-web");
    }

    #[test]
    fn select_defaults_to_sole_target() {
        let manifest = Manifest::parse(MANIFEST).unwrap();
        let (name, _) = manifest.select(None).unwrap();
        assert_eq!(name, "quasar");
    }

    #[test]
    fn select_unknown_target_errors() {
        let manifest = Manifest::parse(MANIFEST).unwrap();
        let err = manifest.select(Some("nope")).unwrap_err();
        assert!(matches!(err, SyncError::TargetNotFound { .. }));
    }

    #[test]
    fn load_missing_manifest_is_config_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = Manifest::load(&dir.path().join("versions.json")).unwrap_err();
        assert!(matches!(err, SyncError::ConfigNotFound { .. }));
    }

    #[test]
    fn load_malformed_manifest_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("versions.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = Manifest::load(&path).unwrap_err();
        assert!(matches!(err, SyncError::ConfigParse { .. }));
    }

    #[test]
    fn workspace_layout() {
        let ws = Workspace::new("/tmp/quasar", "quasar");
        assert_eq!(ws.cache_dir(), PathBuf::from("/tmp/quasar/cache"));
        assert_eq!(ws.primary_path(), PathBuf::from("/tmp/quasar/quasar.jar"));
        assert_eq!(ws.plugin_dir(), PathBuf::from("/tmp/quasar/plugins"));
        assert_eq!(ws.primary_label(), "quasar");
    }
}

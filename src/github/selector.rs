//! Asset selection: partition a release into primary and plugin artifacts.
//!
//! Matching is plain substring search, kept as an explicit policy rather
//! than regex: asset names come from the release publisher, and the only
//! risk worth defending against is naming collisions, which a prefix
//! substring already handles. [`name_matches`] is the single predicate both
//! selectors go through.

use super::{Release, ReleaseAsset};
use crate::core::SyncError;

/// The matching policy: does `name` contain `needle`?
#[must_use]
pub fn name_matches(name: &str, needle: &str) -> bool {
    name.contains(needle)
}

/// Pick the primary artifact: the first asset, in release order, whose name
/// contains `prefix`.
///
/// # Errors
///
/// [`SyncError::NoPrimaryAsset`] when nothing matches. A release without a
/// primary artifact is a configuration or publishing mistake, not an empty
/// result.
pub fn select_primary<'a>(
    release: &'a Release,
    prefix: &str,
) -> Result<&'a ReleaseAsset, SyncError> {
    release
        .assets
        .iter()
        .find(|asset| name_matches(&asset.name, prefix))
        .ok_or_else(|| SyncError::NoPrimaryAsset { prefix: prefix.to_string() })
}

/// Pick all plugin artifacts: every asset, in release order, whose name
/// contains `marker`. An empty result is valid (zero plugins to install).
#[must_use]
pub fn select_plugins<'a>(release: &'a Release, marker: &str) -> Vec<&'a ReleaseAsset> {
    release.assets.iter().filter(|asset| name_matches(&asset.name, marker)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(id: u64, name: &str) -> ReleaseAsset {
        ReleaseAsset { id, name: name.to_string(), size: 100 }
    }

    fn release(names: &[(u64, &str)]) -> Release {
        Release { assets: names.iter().map(|(id, name)| asset(*id, name)).collect() }
    }

    #[test]
    fn primary_is_first_match_in_release_order() {
        let release = release(&[
            (1, "other.txt"),
            (2, "quasar-web-1.2.3.jar"),
            (3, "quasar-web-sources.jar"),
        ]);
        let primary = select_primary(&release, "quasar-web").unwrap();
        assert_eq!(primary.id, 2);
    }

    #[test]
    fn missing_primary_is_an_error() {
        let release = release(&[(1, "plugin-a.jar")]);
        let err = select_primary(&release, "quasar-web").unwrap_err();
        assert!(matches!(err, SyncError::NoPrimaryAsset { .. }));
    }

    #[test]
    fn plugins_preserve_release_order() {
        let release = release(&[
            (1, "quasar-web.jar"),
            (2, "plugin-b.jar"),
            (3, "readme.md"),
            (4, "plugin-a.jar"),
        ]);
        let plugins = select_plugins(&release, "plugin");
        let ids: Vec<u64> = plugins.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![2, 4]);
    }

    #[test]
    fn zero_plugins_is_a_valid_outcome() {
        let release = release(&[(1, "quasar-web.jar")]);
        assert!(select_plugins(&release, "plugin").is_empty());
    }

    #[test]
    fn matching_is_substring_not_prefix() {
        assert!(name_matches("pre-quasar-web.jar", "quasar-web"));
        assert!(!name_matches("quasarweb.jar", "quasar-web"));
    }
}

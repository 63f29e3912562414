//! Drift tier classification of one deployment against its cohort.

use std::cmp::Ordering;

use serde::Serialize;

use crate::version::{Version, compare_versions, version_diff, version_rank};

/// Marker substring flagging a special (exempt) version.
pub const DEFAULT_SPECIAL_MARKER: &str = "-ST-";

/// Default patch distance beyond which a version counts as badly stale.
pub const DEFAULT_PATCH_DRIFT_THRESHOLD: i64 = 20;

/// How stale a deployment is compared to its cohort.
///
/// Serialized in kebab-case (`second-newest`, `no-version`, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DriftTier {
    /// No resolvable version or nothing to compare against.
    NoVersion,
    /// Special tag exempt from numeric comparison.
    Special,
    /// Behind on major or minor, or far behind on patch.
    BehindMajorOrMinor,
    /// Second highest version in the cohort.
    SecondNewest,
    /// Ranked below the second highest version.
    OlderThanSecondNewest,
    /// Highest version in the cohort.
    Newest,
}

/// Tunables for [`classify`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassifierConfig {
    /// Substring marking a special version.
    pub special_marker: String,
    /// A patch diff below `-patch_drift_threshold` counts as badly stale.
    pub patch_drift_threshold: i64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            special_marker: DEFAULT_SPECIAL_MARKER.to_string(),
            patch_drift_threshold: DEFAULT_PATCH_DRIFT_THRESHOLD,
        }
    }
}

impl ClassifierConfig {
    /// Whether `version` carries the special marker.
    #[must_use]
    pub fn is_special(&self, version: &str) -> bool {
        !self.special_marker.is_empty() && version.contains(&self.special_marker)
    }

    /// What: Classify `version` against the versions deployed in its cohort.
    ///
    /// Inputs:
    /// - `version`: Version of the cell being classified; may be empty.
    /// - `cohort`: Versions of every deployment of the same application,
    ///   normally including `version` itself.
    ///
    /// Output:
    /// - The single `DriftTier` for the cell.
    ///
    /// Details:
    /// - First match wins: empty version, special marker, empty comparison
    ///   cohort, staleness gate, then rank.
    /// - Empty and special entries never take part in the comparison.
    /// - The staleness gate (major/minor behind, or patch further behind than
    ///   the threshold) is checked before rank so it always wins.
    #[must_use]
    pub fn classify<S: AsRef<str>>(&self, version: &str, cohort: &[S]) -> DriftTier {
        if version.is_empty() {
            return DriftTier::NoVersion;
        }
        if self.is_special(version) {
            return DriftTier::Special;
        }
        if !Version::parse(version).is_numeric() {
            tracing::debug!(version, "non-numeric segments compared as zero");
        }

        let comparable: Vec<&str> = cohort
            .iter()
            .map(AsRef::as_ref)
            .filter(|v| !v.is_empty() && !self.is_special(v))
            .collect();
        let Some(latest) = comparable.iter().copied().reduce(newer_of) else {
            tracing::trace!(version, "empty comparison cohort");
            return DriftTier::NoVersion;
        };

        let diff = version_diff(version, latest);
        if diff.major < 0 || diff.minor < 0 || diff.patch < -self.patch_drift_threshold {
            return DriftTier::BehindMajorOrMinor;
        }

        match version_rank(version, &comparable) {
            Some(0) => DriftTier::Newest,
            Some(1) => DriftTier::SecondNewest,
            Some(_) => DriftTier::OlderThanSecondNewest,
            None => {
                tracing::debug!(version, latest, "version missing from its cohort");
                DriftTier::NoVersion
            }
        }
    }
}

/// Newer of two versions, keeping `best` on ties so the first maximum wins.
fn newer_of<'a>(best: &'a str, candidate: &'a str) -> &'a str {
    if compare_versions(candidate, best) == Ordering::Greater {
        candidate
    } else {
        best
    }
}

/// What: Classify with the default marker and patch threshold.
///
/// Inputs:
/// - `version`: Version of the cell; may be empty.
/// - `cohort`: Versions deployed for the same application.
///
/// Output:
/// - The cell's `DriftTier`.
#[must_use]
pub fn classify<S: AsRef<str>>(version: &str, cohort: &[S]) -> DriftTier {
    ClassifierConfig::default().classify(version, cohort)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Empty versions never get a colored tier.
    ///
    /// - Input: Empty version with a populated cohort
    /// - Output: `NoVersion`
    fn empty_version_is_no_version() {
        assert_eq!(classify("", &["1.0.0", "2.0.0"]), DriftTier::NoVersion);
    }

    #[test]
    /// What: Special versions bypass comparison regardless of peers.
    ///
    /// - Input: `2.0.0-ST-1` in a cohort with `1.0.0`
    /// - Output: `Special`
    fn special_marker_wins() {
        assert_eq!(
            classify("2.0.0-ST-1", &["2.0.0-ST-1", "1.0.0"]),
            DriftTier::Special
        );
        assert_eq!(classify("0.1-ST-x", &["9.9.9"]), DriftTier::Special);
    }

    #[test]
    /// What: Major or minor regressions dominate rank.
    ///
    /// - Input: `1.0.0` vs `2.0.0`; `1.4.9` vs `1.5.0`
    /// - Output: `BehindMajorOrMinor`
    fn major_minor_regression() {
        assert_eq!(
            classify("1.0.0", &["1.0.0", "2.0.0"]),
            DriftTier::BehindMajorOrMinor
        );
        assert_eq!(
            classify("1.4.9", &["1.4.9", "1.5.0"]),
            DriftTier::BehindMajorOrMinor
        );
    }

    #[test]
    /// What: Patch drift past the threshold counts as badly stale.
    ///
    /// - Input: `1.5.30` vs `1.5.55` (diff -25); `1.5.35` vs `1.5.55` (diff -20)
    /// - Output: `BehindMajorOrMinor`; `SecondNewest`
    fn patch_threshold() {
        assert_eq!(
            classify("1.5.30", &["1.5.30", "1.5.55"]),
            DriftTier::BehindMajorOrMinor
        );
        assert_eq!(
            classify("1.5.35", &["1.5.35", "1.5.55"]),
            DriftTier::SecondNewest
        );
    }

    #[test]
    /// What: Rank decides among versions passing the staleness gate.
    ///
    /// - Input: Two-member cohort; three patch releases on the same minor
    /// - Output: `Newest`, `SecondNewest`, `OlderThanSecondNewest` by position
    fn rank_tiers() {
        assert_eq!(classify("2.0.0", &["2.0.0", "1.9.9"]), DriftTier::Newest);
        assert_eq!(
            classify("2.1.8", &["2.1.10", "2.1.9", "2.1.8"]),
            DriftTier::OlderThanSecondNewest
        );
        assert_eq!(
            classify("2.1.9", &["2.1.10", "2.1.9", "2.1.8"]),
            DriftTier::SecondNewest
        );
    }

    #[test]
    /// What: Trailing the newest major trips the gate even for rank 1.
    ///
    /// - Input: `1.9.0` and `1.8.0` against `2.0.0`
    /// - Output: `BehindMajorOrMinor` for both
    fn cross_major_cohort() {
        // major diff of -1 trips the staleness gate before rank is consulted
        assert_eq!(
            classify("1.9.0", &["2.0.0", "1.9.0", "1.8.0"]),
            DriftTier::BehindMajorOrMinor
        );
        assert_eq!(
            classify("1.8.0", &["2.0.0", "1.9.0", "1.8.0"]),
            DriftTier::BehindMajorOrMinor
        );
    }

    #[test]
    /// What: Nothing to compare against falls back to `NoVersion`.
    ///
    /// - Input: Cohort of only empty and special entries; version absent from cohort
    /// - Output: `NoVersion` in both cases
    fn degenerate_cohorts() {
        assert_eq!(classify("1.0.0", &["", "3.0-ST-2"]), DriftTier::NoVersion);
        let empty: [&str; 0] = [];
        assert_eq!(classify("1.0.0", &empty), DriftTier::NoVersion);
        assert_eq!(classify("1.0.0", &["1.0"]), DriftTier::NoVersion);
    }

    #[test]
    /// What: Duplicated newest versions all rank first.
    ///
    /// - Input: Two projects on `3.2.1`, one on `3.2.0`
    /// - Output: `Newest` for the duplicate, `SecondNewest` is skipped to rank 2
    fn duplicate_newest() {
        let cohort = ["3.2.1", "3.2.0", "3.2.1"];
        assert_eq!(classify("3.2.1", &cohort), DriftTier::Newest);
        assert_eq!(classify("3.2.0", &cohort), DriftTier::OlderThanSecondNewest);
    }

    #[test]
    /// What: Configured threshold and marker are honored.
    ///
    /// - Input: Threshold 5, marker `-hotfix`
    /// - Output: Patch diff -6 is stale; marker flags special
    fn custom_config() {
        let cfg = ClassifierConfig {
            special_marker: "-hotfix".into(),
            patch_drift_threshold: 5,
        };
        assert_eq!(
            cfg.classify("1.0.4", &["1.0.4", "1.0.10"]),
            DriftTier::BehindMajorOrMinor
        );
        assert_eq!(cfg.classify("1.0.4-hotfix", &["1.0.10"]), DriftTier::Special);
    }

    #[test]
    /// What: Non-numeric segments rank as zero instead of failing.
    ///
    /// - Input: `1.x` next to `1.0.1`; hash tag `sha-abc` next to `2.0.0`
    /// - Output: `SecondNewest` for `1.x`; `BehindMajorOrMinor` for the hash tag
    fn non_numeric_versions_rank_as_zero() {
        assert!(!Version::parse("1.x").is_numeric());
        assert_eq!(
            classify("1.x", &["1.x", "1.0.1"]),
            DriftTier::SecondNewest
        );
        assert_eq!(
            classify("sha-abc", &["sha-abc", "2.0.0"]),
            DriftTier::BehindMajorOrMinor
        );
    }

    #[test]
    /// What: Tiers serialize to stable kebab-case labels.
    ///
    /// - Input: Every tier
    /// - Output: JSON strings such as `older-than-second-newest`
    fn tier_labels_serialize_kebab_case() {
        let labels: Vec<serde_json::Value> = [
            DriftTier::NoVersion,
            DriftTier::Special,
            DriftTier::BehindMajorOrMinor,
            DriftTier::SecondNewest,
            DriftTier::OlderThanSecondNewest,
            DriftTier::Newest,
        ]
        .into_iter()
        .map(|t| serde_json::to_value(t).unwrap_or_default())
        .collect();
        assert_eq!(
            labels,
            vec![
                "no-version",
                "special",
                "behind-major-or-minor",
                "second-newest",
                "older-than-second-newest",
                "newest",
            ]
        );
    }
}

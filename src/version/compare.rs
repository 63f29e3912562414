//! Dotted numeric version parsing, ordering, ranking and diffing.
//!
//! Versions here are plain dotted numbers taken from image tags. There is no
//! pre-release or build-metadata precedence: a segment that is not a base-10
//! unsigned integer counts as `0`, which keeps the ordering total.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

/// Dotted numeric version parsed from an image tag.
///
/// Equality and ordering ignore trailing zero segments.
#[derive(Clone, Debug)]
pub struct Version {
    /// Numeric segments in order; unparseable segments are stored as `0`.
    segments: Vec<u64>,
    /// Whether every segment parsed as an integer.
    numeric: bool,
}

impl Version {
    /// What: Parse a dotted version string.
    ///
    /// Inputs:
    /// - `tag`: Raw version text such as `1.4.2`.
    ///
    /// Output:
    /// - `Version` holding one entry per `.`-separated segment.
    ///
    /// Details:
    /// - Segments are trimmed and parsed as `u64`; failures become `0` and mark
    ///   the version as non-numeric (see [`Version::is_numeric`]).
    /// - An empty input yields a single `0` segment.
    #[must_use]
    pub fn parse(tag: &str) -> Self {
        let mut numeric = true;
        let segments = tag
            .split('.')
            .map(|seg| {
                seg.trim().parse::<u64>().unwrap_or_else(|_| {
                    numeric = false;
                    0
                })
            })
            .collect();
        Self { segments, numeric }
    }

    /// Whether every segment of the source string was a plain integer.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        self.numeric
    }

    /// Segment at `idx`, padding missing trailing segments with `0`.
    #[must_use]
    pub fn segment(&self, idx: usize) -> u64 {
        self.segments.get(idx).copied().unwrap_or(0)
    }

    /// Major component (first segment).
    #[must_use]
    pub fn major(&self) -> u64 {
        self.segment(0)
    }

    /// Minor component (second segment).
    #[must_use]
    pub fn minor(&self) -> u64 {
        self.segment(1)
    }

    /// Patch component (third segment).
    #[must_use]
    pub fn patch(&self) -> u64 {
        self.segment(2)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.segments.len().max(other.segments.len());
        for idx in 0..len {
            match self.segment(idx).cmp(&other.segment(idx)) {
                Ordering::Equal => {}
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for seg in &self.segments {
            if !first {
                f.write_str(".")?;
            }
            write!(f, "{seg}")?;
            first = false;
        }
        Ok(())
    }
}

/// Signed per-component difference between two versions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct VersionDiff {
    /// `a.major - b.major`
    pub major: i64,
    /// `a.minor - b.minor`
    pub minor: i64,
    /// `a.patch - b.patch`
    pub patch: i64,
}

/// What: Compare two dotted version strings numerically.
///
/// Inputs:
/// - `a`: Left-hand version.
/// - `b`: Right-hand version.
///
/// Output:
/// - `Ordering` of `a` relative to `b`.
///
/// Details:
/// - Missing trailing segments count as `0`, so `1.2` equals `1.2.0`.
/// - Segments are compared left to right; the first inequality decides.
#[must_use]
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    Version::parse(a).cmp(&Version::parse(b))
}

/// What: Sort a copy of `versions` newest first.
///
/// Inputs:
/// - `versions`: Version strings in any order.
///
/// Output:
/// - New vector ordered from highest to lowest version.
///
/// Details:
/// - The sort is stable, so entries comparing equal keep their input order.
#[must_use]
pub fn sort_descending<S: AsRef<str>>(versions: &[S]) -> Vec<&str> {
    let mut keyed: Vec<(Version, &str)> = versions
        .iter()
        .map(|v| (Version::parse(v.as_ref()), v.as_ref()))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| b.cmp(a));
    keyed.into_iter().map(|(_, raw)| raw).collect()
}

/// What: Locate `version` within the newest-first ordering of `cohort`.
///
/// Inputs:
/// - `version`: Version string to look up.
/// - `cohort`: All versions deployed for the same application.
///
/// Output:
/// - `Some(index)` (zero-based) of the first exact string match.
/// - `None` when `version` is not a member of `cohort`.
///
/// Details:
/// - Duplicates of `version` resolve to the lowest index.
/// - Matching is by string equality, so `1.2` does not find `1.2.0`.
#[must_use]
pub fn version_rank<S: AsRef<str>>(version: &str, cohort: &[S]) -> Option<usize> {
    sort_descending(cohort).iter().position(|v| *v == version)
}

/// What: Subtract `b` from `a` component-wise.
///
/// Inputs:
/// - `a`: Minuend version.
/// - `b`: Subtrahend version.
///
/// Output:
/// - `VersionDiff` over major, minor and patch.
///
/// Details:
/// - Components beyond the third are ignored; missing components count as `0`.
/// - Values saturate at the `i64` range.
#[must_use]
pub fn version_diff(a: &str, b: &str) -> VersionDiff {
    let a = Version::parse(a);
    let b = Version::parse(b);
    VersionDiff {
        major: signed_sub(a.major(), b.major()),
        minor: signed_sub(a.minor(), b.minor()),
        patch: signed_sub(a.patch(), b.patch()),
    }
}

/// Signed difference of two unsigned segments, clamped to `i64`.
fn signed_sub(a: u64, b: u64) -> i64 {
    let wide = i128::from(a) - i128::from(b);
    i64::try_from(wide).unwrap_or(if wide < 0 { i64::MIN } else { i64::MAX })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Equal versions compare equal, including trailing zero padding.
    ///
    /// - Input: Same string twice; `1.2` against `1.2.0`
    /// - Output: `Ordering::Equal`
    fn compare_reflexive_and_padded() {
        assert_eq!(compare_versions("1.4.2", "1.4.2"), Ordering::Equal);
        assert_eq!(compare_versions("1.2", "1.2.0"), Ordering::Equal);
        assert_eq!(compare_versions("1", "1.0.0.0"), Ordering::Equal);
    }

    #[test]
    /// What: Segments compare numerically, not lexically.
    ///
    /// - Input: `1.10.0` vs `1.9.0`, `2.0` vs `1.99.99`
    /// - Output: Left side greater in both cases; reversed call is the inverse
    fn compare_numeric_and_antisymmetric() {
        assert_eq!(compare_versions("1.10.0", "1.9.0"), Ordering::Greater);
        assert_eq!(compare_versions("1.9.0", "1.10.0"), Ordering::Less);
        assert_eq!(compare_versions("2.0", "1.99.99"), Ordering::Greater);
        assert_eq!(compare_versions("1.2.3.4", "1.2.3"), Ordering::Greater);
    }

    #[test]
    /// What: Ordering is transitive across a chain of versions.
    ///
    /// - Input: `3.0.0 > 2.5.1 > 2.5`
    /// - Output: `3.0.0 > 2.5`
    fn compare_transitive() {
        assert_eq!(compare_versions("3.0.0", "2.5.1"), Ordering::Greater);
        assert_eq!(compare_versions("2.5.1", "2.5"), Ordering::Greater);
        assert_eq!(compare_versions("3.0.0", "2.5"), Ordering::Greater);
    }

    #[test]
    /// What: Unparseable segments count as zero and flag the version.
    ///
    /// - Input: `1.x.3`, `sha-abc`
    /// - Output: Equal to `1.0.3` / `0`; `is_numeric` false
    fn parse_unparseable_segments_as_zero() {
        let v = Version::parse("1.x.3");
        assert!(!v.is_numeric());
        assert_eq!(v, Version::parse("1.0.3"));
        assert_eq!(compare_versions("sha-abc", "0"), Ordering::Equal);
        assert!(Version::parse("4.5.6").is_numeric());
        assert_eq!(Version::parse("4.5.6").to_string(), "4.5.6");
    }

    #[test]
    /// What: Rank finds the first occurrence in newest-first order.
    ///
    /// - Input: Single-member cohort; cohort with duplicates and a missing entry
    /// - Output: `Some(0)`, lowest index for duplicates, `None` when absent
    fn rank_first_occurrence() {
        assert_eq!(version_rank("1.0.0", &["1.0.0"]), Some(0));
        let cohort = ["1.0.0", "2.0.0", "1.0.0", "1.5.0"];
        assert_eq!(version_rank("2.0.0", &cohort), Some(0));
        assert_eq!(version_rank("1.5.0", &cohort), Some(1));
        assert_eq!(version_rank("1.0.0", &cohort), Some(2));
        assert_eq!(version_rank("0.9.0", &cohort), None);
    }

    #[test]
    /// What: Sorting is stable for versions that compare equal.
    ///
    /// - Input: `1.2` and `1.2.0` in both input orders
    /// - Output: Input order preserved among the equal pair
    fn sort_descending_is_stable() {
        assert_eq!(
            sort_descending(&["1.2", "1.3", "1.2.0"]),
            vec!["1.3", "1.2", "1.2.0"]
        );
        assert_eq!(
            sort_descending(&["1.2.0", "1.3", "1.2"]),
            vec!["1.3", "1.2.0", "1.2"]
        );
        assert_eq!(version_rank("1.2.0", &["1.2", "1.2.0"]), Some(1));
    }

    #[test]
    /// What: Diff subtracts the first three components only.
    ///
    /// - Input: `1.5.30` minus `1.5.55`; `2.0` minus `1.9.9.9`
    /// - Output: Patch `-25`; major `1`, minor `-9`, patch `-9`
    fn diff_components() {
        assert_eq!(
            version_diff("1.5.30", "1.5.55"),
            VersionDiff {
                major: 0,
                minor: 0,
                patch: -25
            }
        );
        assert_eq!(
            version_diff("2.0", "1.9.9.9"),
            VersionDiff {
                major: 1,
                minor: -9,
                patch: -9
            }
        );
    }
}

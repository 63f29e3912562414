//! Version parsing and comparison for image tags.

pub mod compare;
pub mod tag;

pub use compare::{
    Version, VersionDiff, compare_versions, sort_descending, version_diff, version_rank,
};
pub use tag::{LATEST_TAG, TagRules};

//! Drift classification of deployments and its display mapping.

pub mod classify;
pub mod style;

pub use classify::{
    ClassifierConfig, DEFAULT_PATCH_DRIFT_THRESHOLD, DEFAULT_SPECIAL_MARKER, DriftTier, classify,
};
pub use style::{CellStyle, Rgb};

//! Library entry for vermatrix exposing the version matrix engine for integration tests.

pub mod args;
pub mod drift;
pub mod matrix;
pub mod report;
pub mod settings;
pub mod version;

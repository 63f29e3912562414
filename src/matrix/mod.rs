//! Application list model and the cross-project version matrix built from it.

pub mod group;
pub mod model;

pub use group::{
    Deployment, GroupedApplications, MatrixCell, MatrixRow, MatrixRules, VersionMatrix,
    format_project_name,
};
pub use model::{ApplicationList, load_applications, parse_applications};

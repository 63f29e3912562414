//! Grouping of applications into the cross-project version matrix.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write;

use serde::Serialize;

use super::model::{Application, ApplicationList};
use crate::drift::{CellStyle, ClassifierConfig, DriftTier};
use crate::version::TagRules;

/// Default application type label included in the matrix.
pub const DEFAULT_APPLICATION_TYPE: &str = "services";
/// Default environment label excluded from the matrix.
pub const DEFAULT_EXCLUDED_ENVIRONMENT: &str = "dev";
/// Default base URL for cell detail links.
pub const DEFAULT_LINK_BASE_URL: &str = "https://localhost";

/// Rules controlling which applications enter the matrix and how cells are built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatrixRules {
    /// Required `applicationType` label value.
    pub application_type: String,
    /// `environment` label value that is left out.
    pub excluded_environment: String,
    /// Base URL of the delivery UI, used for cell links.
    pub link_base_url: String,
    /// Image tag extraction.
    pub tags: TagRules,
    /// Drift classification.
    pub classifier: ClassifierConfig,
}

impl Default for MatrixRules {
    fn default() -> Self {
        Self {
            application_type: DEFAULT_APPLICATION_TYPE.to_string(),
            excluded_environment: DEFAULT_EXCLUDED_ENVIRONMENT.to_string(),
            link_base_url: DEFAULT_LINK_BASE_URL.to_string(),
            tags: TagRules::default(),
            classifier: ClassifierConfig::default(),
        }
    }
}

/// One application deployed into one project.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Deployment {
    /// Resource name.
    pub name: String,
    /// Version used for classification; empty when no image qualified.
    pub version: String,
    /// Further retained tags, shown but not compared.
    pub extra_tags: Vec<String>,
}

/// Deployments keyed by generic name, then by project.
pub type GroupedApplications = BTreeMap<String, BTreeMap<String, Deployment>>;

/// A classified matrix cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MatrixCell {
    /// Resource name.
    pub name: String,
    /// Deployed version, possibly empty.
    pub version: String,
    /// Further retained tags.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extra_tags: Vec<String>,
    /// Drift tier of `version` within its row.
    pub tier: DriftTier,
    /// Display colors of `tier`.
    pub style: CellStyle,
    /// Link to the resource detail page.
    pub url: String,
}

impl MatrixCell {
    /// Text shown in the cell: the version followed by any extra tags.
    #[must_use]
    pub fn display_text(&self) -> String {
        std::iter::once(self.version.as_str())
            .chain(self.extra_tags.iter().map(String::as_str))
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// One logical application across all projects.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MatrixRow {
    /// Logical application name.
    pub generic_name: String,
    /// Cells aligned with [`VersionMatrix::projects`]; `None` where not deployed.
    pub cells: Vec<Option<MatrixCell>>,
}

/// The full version matrix.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct VersionMatrix {
    /// Project identifiers, sorted.
    pub projects: Vec<String>,
    /// Rows sorted by generic name.
    pub rows: Vec<MatrixRow>,
}

impl VersionMatrix {
    /// Whether the matrix has no rows.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl MatrixRules {
    /// What: Decide whether an application belongs to the matrix.
    ///
    /// Inputs:
    /// - `app`: Application resource.
    ///
    /// Output:
    /// - `Some(generic_name)` when included, `None` otherwise.
    ///
    /// Details:
    /// - Requires a non-empty `genericApplicationName`, the configured
    ///   `applicationType`, an environment other than the excluded one and a
    ///   non-empty project.
    fn generic_name_of<'a>(&self, app: &'a Application) -> Option<&'a str> {
        let labels = &app.metadata.labels;
        let generic = labels
            .generic_application_name
            .as_deref()
            .filter(|g| !g.is_empty())?;
        if labels.application_type.as_deref() != Some(self.application_type.as_str()) {
            return None;
        }
        if labels.environment.as_deref() == Some(self.excluded_environment.as_str()) {
            return None;
        }
        if app.spec.project.is_empty() {
            tracing::debug!(app = %app.metadata.name, "skipping application without project");
            return None;
        }
        Some(generic)
    }

    /// What: Group included applications by generic name and project.
    ///
    /// Inputs:
    /// - `list`: Parsed application list.
    ///
    /// Output:
    /// - `(grouped, projects)` where `projects` is the sorted set of all
    ///   projects seen among included applications.
    ///
    /// Details:
    /// - A later application with the same generic name and project replaces
    ///   the earlier one.
    #[must_use]
    pub fn group(&self, list: &ApplicationList) -> (GroupedApplications, BTreeSet<String>) {
        let mut grouped = GroupedApplications::new();
        let mut projects = BTreeSet::new();
        for app in &list.items {
            let Some(generic) = self.generic_name_of(app) else {
                continue;
            };
            let mut tags = self
                .tags
                .cohort_tags(&app.status.summary.image_refs())
                .into_iter();
            let deployment = Deployment {
                name: app.metadata.name.clone(),
                version: tags.next().unwrap_or_default(),
                extra_tags: tags.collect(),
            };
            projects.insert(app.spec.project.clone());
            let previous = grouped
                .entry(generic.to_string())
                .or_default()
                .insert(app.spec.project.clone(), deployment);
            if let Some(prev) = previous {
                tracing::debug!(
                    generic,
                    project = %app.spec.project,
                    replaced = %prev.name,
                    "duplicate deployment for project"
                );
            }
        }
        (grouped, projects)
    }

    /// What: Build the classified version matrix.
    ///
    /// Inputs:
    /// - `list`: Parsed application list.
    ///
    /// Output:
    /// - `VersionMatrix` with rows ordered case-insensitively by generic name
    ///   and columns ordered by project.
    ///
    /// Details:
    /// - Each row's cohort is the multiset of its deployments' versions.
    #[must_use]
    pub fn build_matrix(&self, list: &ApplicationList) -> VersionMatrix {
        let (grouped, projects) = self.group(list);
        let projects: Vec<String> = projects.into_iter().collect();

        let mut names: Vec<&String> = grouped.keys().collect();
        names.sort_by(|a, b| {
            a.to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b))
        });

        let rows = names
            .into_iter()
            .map(|generic| {
                let by_project = &grouped[generic];
                let cohort: Vec<&str> = by_project
                    .values()
                    .map(|d| d.version.as_str())
                    .collect();
                let cells = projects
                    .iter()
                    .map(|p| by_project.get(p).map(|d| self.cell(d, &cohort)))
                    .collect();
                MatrixRow {
                    generic_name: generic.clone(),
                    cells,
                }
            })
            .collect::<Vec<_>>();

        tracing::info!(
            rows = rows.len(),
            projects = projects.len(),
            "built version matrix"
        );
        VersionMatrix { projects, rows }
    }

    /// Classify one deployment against its row cohort.
    fn cell(&self, deployment: &Deployment, cohort: &[&str]) -> MatrixCell {
        let tier = self.classifier.classify(&deployment.version, cohort);
        MatrixCell {
            name: deployment.name.clone(),
            version: deployment.version.clone(),
            extra_tags: deployment.extra_tags.clone(),
            tier,
            style: tier.style(),
            url: self.detail_url(&deployment.name),
        }
    }

    /// What: Build the detail page link of an application.
    ///
    /// Inputs:
    /// - `name`: Application resource name.
    ///
    /// Output:
    /// - `{base}/applications/argocd/{name}` with `name` percent-encoded.
    #[must_use]
    pub fn detail_url(&self, name: &str) -> String {
        format!(
            "{}/applications/argocd/{}",
            self.link_base_url.trim_end_matches('/'),
            encode_path_segment(name)
        )
    }
}

/// Percent-encode everything outside the RFC 3986 unreserved set.
fn encode_path_segment(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for &b in input.as_bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~') {
            out.push(char::from(b));
        } else {
            let _ = write!(out, "%{b:02X}");
        }
    }
    out
}

/// What: Turn a project identifier into a column title.
///
/// Inputs:
/// - `name`: Project identifier such as `team-a-prod`.
///
/// Output:
/// - Words split on `-`, first letter uppercased, joined by spaces (`Team A Prod`).
#[must_use]
pub fn format_project_name(name: &str) -> String {
    name.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

//! Typed view of the application list payload.
//!
//! Only the fields the matrix needs are modeled. Every field is optional in the
//! payload: missing keys and explicit `null`s fall back to defaults so a
//! partially populated response still yields a usable list.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Deserialize a value, mapping `null` to `T::default()`.
fn null_default<'de, D, T>(de: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(de)?.unwrap_or_default())
}

/// Response body of the application list endpoint.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ApplicationList {
    /// Applications in response order.
    #[serde(deserialize_with = "null_default")]
    pub items: Vec<Application>,
}

/// One deployed application resource.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Application {
    /// Name and labels.
    #[serde(deserialize_with = "null_default")]
    pub metadata: Metadata,
    /// Desired state; only the owning project is read.
    #[serde(deserialize_with = "null_default")]
    pub spec: Spec,
    /// Observed state; only the image summary is read.
    #[serde(deserialize_with = "null_default")]
    pub status: Status,
}

/// Application metadata.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Metadata {
    /// Resource name, also used for the detail page link.
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    /// Grouping labels.
    #[serde(deserialize_with = "null_default")]
    pub labels: Labels,
}

/// Labels consulted when grouping.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Labels {
    /// Logical application the resource belongs to.
    pub generic_application_name: Option<String>,
    /// Kind of application (`services`, `jobs`, ...).
    pub application_type: Option<String>,
    /// Environment label (`dev`, `test`, `prod`, ...).
    pub environment: Option<String>,
}

/// Application spec.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Spec {
    /// Owning project.
    #[serde(deserialize_with = "null_default")]
    pub project: String,
}

/// Application status.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Status {
    /// Resource summary.
    #[serde(deserialize_with = "null_default")]
    pub summary: Summary,
}

/// Status summary.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Summary {
    /// Container images currently running; entries may be `null`.
    #[serde(deserialize_with = "null_default")]
    pub images: Vec<Option<String>>,
}

impl Summary {
    /// Non-null image references in order.
    #[must_use]
    pub fn image_refs(&self) -> Vec<&str> {
        self.images.iter().flatten().map(String::as_str).collect()
    }
}

/// What: Parse an application list from JSON text.
///
/// Inputs:
/// - `json`: Response body.
///
/// Output:
/// - `Ok(ApplicationList)`; `Err` when the text is not JSON or a present field
///   has the wrong shape.
///
/// # Errors
/// Returns the `serde_json` error for malformed input.
pub fn parse_applications(json: &str) -> Result<ApplicationList> {
    let list: ApplicationList = serde_json::from_str(json)?;
    tracing::debug!(items = list.items.len(), "parsed application list");
    Ok(list)
}

/// What: Load an application list from a file, or stdin for `-`.
///
/// Inputs:
/// - `path`: File path or `-`.
///
/// Output:
/// - Parsed `ApplicationList`.
///
/// # Errors
/// Fails when the source cannot be read or does not parse.
pub fn load_applications(path: &Path) -> Result<ApplicationList> {
    let body = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?
    };
    parse_applications(&body).map_err(|e| format!("failed to load applications: {e}").into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Absent and null fields fall back to defaults.
    ///
    /// - Input: Items with missing spec, null labels, null images
    /// - Output: Parsed list with empty defaults
    fn parse_tolerates_missing_and_null() {
        let json = r#"{
            "items": [
                {"metadata": {"name": "a", "labels": null}},
                {"metadata": {"name": "b", "labels": {"genericApplicationName": "svc"}},
                 "spec": {"project": "p1"},
                 "status": {"summary": {"images": ["x:1.0", null]}}},
                {"status": {"summary": {"images": null}}}
            ],
            "metadata": {"resourceVersion": "42"}
        }"#;
        let list = parse_applications(json).unwrap_or_default();
        assert_eq!(list.items.len(), 3);
        let first = &list.items[0];
        assert!(first.metadata.labels.generic_application_name.is_none());
        assert_eq!(first.spec.project, "");
        let second = &list.items[1].metadata.labels;
        assert_eq!(second.generic_application_name.as_deref(), Some("svc"));
        assert_eq!(list.items[1].status.summary.image_refs(), vec!["x:1.0"]);
        assert!(list.items[2].status.summary.images.is_empty());
    }

    #[test]
    /// What: Null or missing `items` yields an empty list; garbage is an error.
    ///
    /// - Input: `{}`, `{"items": null}`, `not json`
    /// - Output: Empty, empty, `Err`
    fn parse_edges() {
        assert!(
            parse_applications("{}")
                .map(|l| l.items.is_empty())
                .unwrap_or(false)
        );
        assert!(
            parse_applications(r#"{"items": null}"#)
                .map(|l| l.items.is_empty())
                .unwrap_or(false)
        );
        assert!(parse_applications("not json").is_err());
    }
}

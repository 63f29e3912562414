//! Image reference to version tag extraction.

/// Tag assumed for image references without an explicit tag.
pub const LATEST_TAG: &str = "latest";

/// Default maximum tag length kept from an image reference.
pub const DEFAULT_TAG_MAX_LEN: usize = 14;

/// Default markers identifying images that never belong to a cohort.
pub const DEFAULT_IGNORED_MARKERS: &[&str] = &["telepresence"];

/// Rules for turning image references into version tags.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagRules {
    /// Maximum number of characters kept from a tag.
    pub max_len: usize,
    /// Substrings marking an image as excluded (debug sidecars and the like).
    pub ignored_markers: Vec<String>,
}

impl Default for TagRules {
    fn default() -> Self {
        Self {
            max_len: DEFAULT_TAG_MAX_LEN,
            ignored_markers: DEFAULT_IGNORED_MARKERS
                .iter()
                .map(|m| (*m).to_string())
                .collect(),
        }
    }
}

impl TagRules {
    /// What: Extract the raw tag of an image reference.
    ///
    /// Inputs:
    /// - `image`: Image reference such as `registry:5000/team/app:1.4.2`.
    ///
    /// Output:
    /// - Tag text after the last `:`, truncated to `max_len` characters.
    /// - `"latest"` when the reference carries no `:`.
    ///
    /// Details:
    /// - Truncation counts characters, not bytes.
    /// - A registry port with no tag (`host:5000/app`) yields the text after the
    ///   port colon, which is returned as-is.
    #[must_use]
    pub fn image_tag(&self, image: &str) -> String {
        image.rsplit_once(':').map_or_else(
            || LATEST_TAG.to_string(),
            |(_, tag)| tag.chars().take(self.max_len).collect(),
        )
    }

    /// What: Extract the cohort version of an image reference.
    ///
    /// Inputs:
    /// - `image`: Image reference, possibly empty.
    ///
    /// Output:
    /// - The tag, or an empty string when the image is excluded.
    ///
    /// Details:
    /// - Empty references, `latest` tags and references containing an ignored
    ///   marker (case-insensitive) are excluded.
    #[must_use]
    pub fn cohort_tag(&self, image: &str) -> String {
        let image = image.trim();
        if image.is_empty() || self.is_ignored(image) {
            return String::new();
        }
        let tag = self.image_tag(image);
        if tag == LATEST_TAG {
            return String::new();
        }
        tag
    }

    /// What: Extract the retained tags of a list of image references.
    ///
    /// Inputs:
    /// - `images`: Image references reported for one deployment.
    ///
    /// Output:
    /// - Non-empty tags in input order.
    #[must_use]
    pub fn cohort_tags<S: AsRef<str>>(&self, images: &[S]) -> Vec<String> {
        images
            .iter()
            .map(|img| self.cohort_tag(img.as_ref()))
            .filter(|tag| !tag.is_empty())
            .collect()
    }

    /// Whether `image` contains one of the ignored markers.
    fn is_ignored(&self, image: &str) -> bool {
        let lower = image.to_ascii_lowercase();
        self.ignored_markers
            .iter()
            .filter(|m| !m.is_empty())
            .any(|m| lower.contains(&m.to_ascii_lowercase()))
    }
}

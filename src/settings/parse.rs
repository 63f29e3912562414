//! `settings.conf` parsing.

use super::Settings;

/// What: Check if a line should be skipped (empty or comment).
///
/// Inputs:
/// - `line`: Line to check
///
/// Output:
/// - `true` for empty lines and lines starting with `#`, `//`, or `;`
#[must_use]
pub fn skip_comment_or_empty(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty()
        || trimmed.starts_with('#')
        || trimmed.starts_with("//")
        || trimmed.starts_with(';')
}

/// What: Split a `key = value` line.
///
/// Inputs:
/// - `line`: Raw line.
///
/// Output:
/// - `Some((key, value))` with the key normalized to lowercase `snake_case`
///   and any trailing ` # comment` removed from the value; `None` when there
///   is no `=`.
///
/// Details:
/// - Only a `#` preceded by whitespace starts an inline comment, so values
///   such as URLs keep their `//` and fragment characters.
#[must_use]
pub fn parse_key_value(line: &str) -> Option<(String, String)> {
    let (raw_key, raw_val) = line.trim().split_once('=')?;
    let key = raw_key.trim().to_lowercase().replace(['.', '-', ' '], "_");
    let val = raw_val
        .find(" #")
        .or_else(|| raw_val.find("\t#"))
        .map_or(raw_val, |i| &raw_val[..i]);
    Some((key, val.trim().to_string()))
}

/// Lenient boolean parsing shared by all switches.
fn parse_bool(val: &str) -> Option<bool> {
    match val.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// What: Apply `settings.conf` content on top of `settings`.
///
/// Inputs:
/// - `content`: File content.
/// - `settings`: Settings to update in place.
///
/// Output:
/// - None (modifies `settings`).
///
/// Details:
/// - Unknown keys and invalid values are skipped with a debug log; the
///   previous value is kept.
pub fn parse_settings(content: &str, settings: &mut Settings) {
    for line in content.lines() {
        if skip_comment_or_empty(line) {
            continue;
        }
        let Some((key, val)) = parse_key_value(line) else {
            continue;
        };
        let applied = match key.as_str() {
            "special_marker" | "special_tag_marker" => {
                settings.rules.classifier.special_marker.clone_from(&val);
                true
            }
            "patch_drift_threshold" | "patch_threshold" => val
                .parse::<i64>()
                .ok()
                .filter(|v| *v >= 0)
                .map(|v| settings.rules.classifier.patch_drift_threshold = v)
                .is_some(),
            "application_type" | "app_type" => {
                settings.rules.application_type.clone_from(&val);
                true
            }
            "excluded_environment" | "exclude_environment" => {
                settings.rules.excluded_environment.clone_from(&val);
                true
            }
            "link_base_url" | "argocd_url" | "base_url" => {
                settings.rules.link_base_url.clone_from(&val);
                true
            }
            "tag_max_len" | "tag_max_length" => val
                .parse::<usize>()
                .ok()
                .filter(|v| *v > 0)
                .map(|v| settings.rules.tags.max_len = v)
                .is_some(),
            "ignored_image_markers" | "ignore_images" => {
                settings.rules.tags.ignored_markers = val
                    .split(',')
                    .map(str::trim)
                    .filter(|m| !m.is_empty())
                    .map(ToString::to_string)
                    .collect();
                true
            }
            "color_output" | "color" => parse_bool(&val)
                .map(|v| settings.color_output = v)
                .is_some(),
            _ => false,
        };
        if !applied {
            tracing::debug!(key = %key, value = %val, "ignoring settings entry");
        }
    }
}

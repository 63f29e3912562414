//! Text and JSON output of the version matrix.

use crossterm::style::{Color, Stylize};
use unicode_width::UnicodeWidthStr;

use crate::drift::{CellStyle, Rgb};
use crate::matrix::{MatrixCell, VersionMatrix, format_project_name};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Header of the first column.
const NAME_HEADER: &str = "Application Name";
/// Separator between columns.
const COLUMN_GAP: &str = "  ";

/// Output format selected on the command line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned text table.
    #[default]
    Table,
    /// Pretty-printed JSON.
    Json,
}

/// Pad `text` with spaces to `width` display columns.
fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(fill))
}

/// Convert a palette color to a terminal color.
const fn term_color(c: Rgb) -> Color {
    Color::Rgb {
        r: c.0,
        g: c.1,
        b: c.2,
    }
}

/// Paint an already padded cell with its tier style.
fn paint(text: String, style: CellStyle) -> String {
    match (style.background, style.foreground) {
        (Some(bg), Some(fg)) => text.with(term_color(fg)).on(term_color(bg)).to_string(),
        (Some(bg), None) => text.on(term_color(bg)).to_string(),
        (None, Some(fg)) => text.with(term_color(fg)).to_string(),
        (None, None) => text,
    }
}

/// What: Render the matrix as an aligned text table.
///
/// Inputs:
/// - `matrix`: Classified matrix.
/// - `color`: Paint cells with their tier colors using ANSI escapes.
///
/// Output:
/// - Table text ending with a newline.
///
/// Details:
/// - Columns are sized by display width of headers and cell text.
/// - Missing deployments render as blank cells.
/// - An empty matrix renders a single `No applications found` line.
#[must_use]
pub fn render_table(matrix: &VersionMatrix, color: bool) -> String {
    if matrix.is_empty() {
        return "No applications found\n".to_string();
    }

    let headers: Vec<String> = matrix
        .projects
        .iter()
        .map(|p| format_project_name(p))
        .collect();
    let name_width = matrix
        .rows
        .iter()
        .map(|r| r.generic_name.width())
        .chain(std::iter::once(NAME_HEADER.width()))
        .max()
        .unwrap_or(0);
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(idx, h)| {
            matrix
                .rows
                .iter()
                .filter_map(|r| r.cells.get(idx).and_then(Option::as_ref))
                .map(|c| c.display_text().width())
                .chain(std::iter::once(h.width()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let mut header = pad(NAME_HEADER, name_width);
    for (h, w) in headers.iter().zip(&widths) {
        header.push_str(COLUMN_GAP);
        header.push_str(&pad(h, *w));
    }
    out.push_str(header.trim_end());
    out.push('\n');

    for row in &matrix.rows {
        let mut line = pad(&row.generic_name, name_width);
        for (cell, w) in row.cells.iter().zip(&widths) {
            line.push_str(COLUMN_GAP);
            let text = cell
                .as_ref()
                .map(MatrixCell::display_text)
                .unwrap_or_default();
            let padded = pad(&text, *w);
            match cell {
                Some(c) if color && !text.is_empty() => line.push_str(&paint(padded, c.style)),
                _ => line.push_str(&padded),
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// What: Render the matrix as pretty JSON.
///
/// Inputs:
/// - `matrix`: Classified matrix.
///
/// Output:
/// - JSON text with `projects` and `rows`.
///
/// # Errors
/// Propagates `serde_json` serialization errors.
pub fn render_json(matrix: &VersionMatrix) -> Result<String> {
    Ok(serde_json::to_string_pretty(matrix)?)
}

/// What: Render in the requested format.
///
/// Inputs:
/// - `matrix`: Classified matrix.
/// - `format`: Table or JSON.
/// - `color`: Color table cells.
///
/// Output:
/// - Rendered text.
///
/// # Errors
/// Propagates JSON serialization errors.
pub fn render(matrix: &VersionMatrix, format: OutputFormat, color: bool) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(matrix, color)),
        OutputFormat::Json => render_json(matrix),
    }
}

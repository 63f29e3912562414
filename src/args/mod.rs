//! Command-line argument parsing and the top-level run.

pub mod definition;

pub use definition::{Args, determine_log_level};

use crate::matrix::load_applications;
use crate::report::render;
use crate::settings::Settings;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// What: Execute one run: load settings and input, build and render the matrix.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - Rendered output text.
///
/// Details:
/// - Color applies only to table output and requires both the setting and
///   the absence of `--no-color`.
///
/// # Errors
/// Fails when the settings file given with `--config` or the input cannot be
/// read or parsed.
pub fn run(args: &Args) -> Result<String> {
    let settings = Settings::load(args.config.as_deref())?;
    let list = load_applications(&args.input)?;
    let matrix = settings.rules.build_matrix(&list);
    let color = settings.color_output && !args.no_color;
    tracing::debug!(format = ?args.format, color, "rendering matrix");
    render(&matrix, args.format, color)
}

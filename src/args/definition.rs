//! Command-line argument definition.

use std::path::PathBuf;

use clap::Parser;

use crate::report::OutputFormat;

/// vermatrix - cross-project version matrix with drift classification
#[derive(Parser, Debug)]
#[command(name = "vermatrix")]
#[command(version)]
#[command(about = "Show which version of each application runs in each project and flag drift", long_about = None)]
pub struct Args {
    /// Application list JSON to read (`-` for stdin)
    #[arg(short, long, default_value = "-")]
    pub input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Settings file to use instead of ~/.config/vermatrix/settings.conf
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

/// What: Determine the log level from command-line arguments.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - Log level string (trace, debug, info, warn, error).
///
/// Details:
/// - The verbose flag overrides `--log-level`.
#[must_use]
pub fn determine_log_level(args: &Args) -> String {
    if args.verbose {
        "debug".to_string()
    } else {
        args.log_level.clone()
    }
}

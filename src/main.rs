//! vermatrix binary entrypoint kept minimal. The run itself lives in `args`.

use std::fmt;
use std::process::ExitCode;
use std::sync::OnceLock;

use clap::Parser;
use vermatrix::args::{self, Args};
use vermatrix::settings;

/// Log timestamp formatter (`YYYY-MM-DD-T HH:MM:SS`, local time).
struct VermatrixTimer;

impl tracing_subscriber::fmt::time::FormatTime for VermatrixTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        let ts = chrono::Local::now()
            .format("%Y-%m-%d-T %H:%M:%S")
            .to_string();
        w.write_str(&ts)
    }
}

/// Keeps the non-blocking log writer alive for the process lifetime.
static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// Initialize tracing to `~/.config/vermatrix/logs/vermatrix.log`, falling back to stderr.
fn init_logging(level: &str) {
    let env_filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level))
    };
    let mut log_path = settings::logs_dir();
    log_path.push("vermatrix.log");
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(VermatrixTimer)
                .init();
            let _ = LOG_GUARD.set(guard);
            tracing::info!(path = %log_path.display(), "logging initialized");
        }
        Err(e) => {
            // Fallback: stderr keeps stdout clean for the report
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_timer(VermatrixTimer)
                .init();
            tracing::warn!(error = %e, "failed to open log file; using stderr");
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args::determine_log_level(&args));
    tracing::info!(input = %args.input.display(), format = ?args.format, "vermatrix starting");

    match args::run(&args) {
        Ok(out) => {
            print!("{out}");
            tracing::info!("vermatrix finished");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "run failed");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use memcmp_core::models::ComparisonReport;

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a CLI log-level name to a `tracing` filter directive.
///
/// Unknown names are passed through so `EnvFilter` can still try them.
pub fn filter_directive(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" | "WARN" => "warn".to_string(),
        "ERROR" => "error".to_string(),
        other => other.to_lowercase(),
    }
}

/// Initialise the global `tracing` subscriber.
///
/// Logs go to stderr so stdout carries nothing but the report. Falls back to
/// `"warn"` if the level string is not a valid filter.
pub fn setup_logging(log_level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(filter_directive(log_level)).unwrap_or_else(|_| EnvFilter::new("warn"));

    let subscriber = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()?;

    Ok(())
}

// ── Exit status ────────────────────────────────────────────────────────────────

/// Process exit status for a finished run.
///
/// Always 0 unless `strict` is set and at least one source was not found.
pub fn exit_status(report: &ComparisonReport, strict: bool) -> u8 {
    if strict && !report.missing().is_empty() {
        2
    } else {
        0
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

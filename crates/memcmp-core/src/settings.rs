use clap::{Parser, ValueEnum};
use std::path::PathBuf;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Compare installed memory size reported by lgrpinfo, prtconf and sysconf
#[derive(Parser, Debug, Clone)]
#[command(
    name = "mem-compare",
    about = "Compare installed memory size reported by lgrpinfo, prtconf and sysconf",
    version
)]
pub struct Settings {
    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Append binary-unit sizes (e.g. "16.00 GiB") to text report lines
    #[arg(long)]
    pub human: bool,

    /// Exit with status 2 when any source could not be read
    #[arg(long)]
    pub strict: bool,

    /// Read the locality-group report from a file instead of running `lgrpinfo -a`
    #[arg(long, value_name = "FILE")]
    pub lgroup_report: Option<PathBuf>,

    /// Read the device tree report from a file instead of running `prtconf -v`
    #[arg(long, value_name = "FILE")]
    pub prtconf_report: Option<PathBuf>,

    /// Logging level
    #[arg(long, default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

/// Rendering used for the comparison report.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Five plain lines, one value per line.
    Text,
    /// Pretty-printed JSON document.
    Json,
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments and apply the `--debug` override.
    pub fn load() -> Self {
        Self::load_from_args(std::env::args_os())
    }

    /// Same as [`Settings::load`] but accepts an explicit argument list.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::resolve(Settings::parse_from(args))
    }

    /// `--debug` overrides the log level.
    fn resolve(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

mod bootstrap;

use std::io::Write;
use std::process::ExitCode;

use anyhow::Result;
use memcmp_core::settings::Settings;
use memcmp_data::counters::SysconfCounters;
use memcmp_data::source::SystemSources;
use memcmp_runtime::orchestrator::{MemoryComparison, SourcePlan};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("mem-compare v{} starting", env!("CARGO_PKG_VERSION"));

    let plan = SourcePlan::with_overrides(settings.lgroup_report.clone(), settings.prtconf_report.clone());
    let comparison = MemoryComparison::new(SystemSources, SysconfCounters, plan);
    let report = comparison.run().await;

    let rendered = memcmp_report::render(&report, settings.format, settings.human)?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    stdout.flush()?;

    Ok(ExitCode::from(bootstrap::exit_status(&report, settings.strict)))
}

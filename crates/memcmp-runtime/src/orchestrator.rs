//! One-shot sampling of all three sources.
//!
//! The readers run strictly one after another: the locality-group report,
//! then the device tree report, then the page counters. Each reader opens and
//! releases its own source before the next one starts, and nothing is shared
//! between them except the finished readings handed to [`reconcile`].

use std::path::PathBuf;

use memcmp_core::models::ComparisonReport;
use memcmp_data::counters::{read_page_counters, PageCounters};
use memcmp_data::lgroup::{self, read_root_group};
use memcmp_data::prtconf::{self, read_memory_size};
use memcmp_data::source::{SourceLocation, SourceOpener};

use crate::reconciler::reconcile;

// ── SourcePlan ────────────────────────────────────────────────────────────────

/// Where each textual report is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePlan {
    /// Locality-group report (`lgrpinfo -a` by default).
    pub lgroup: SourceLocation,
    /// Device tree report (`prtconf -v` by default).
    pub prtconf: SourceLocation,
}

impl Default for SourcePlan {
    fn default() -> Self {
        Self {
            lgroup: lgroup::default_location(),
            prtconf: prtconf::default_location(),
        }
    }
}

impl SourcePlan {
    /// Replace the default utilities with captured report files where given.
    pub fn with_overrides(lgroup_report: Option<PathBuf>, prtconf_report: Option<PathBuf>) -> Self {
        let defaults = Self::default();
        Self {
            lgroup: lgroup_report.map(SourceLocation::File).unwrap_or(defaults.lgroup),
            prtconf: prtconf_report.map(SourceLocation::File).unwrap_or(defaults.prtconf),
        }
    }
}

// ── MemoryComparison ──────────────────────────────────────────────────────────

/// Samples every source once and reconciles them against the page counters.
///
/// # Example
/// ```no_run
/// use memcmp_data::counters::SysconfCounters;
/// use memcmp_data::source::SystemSources;
/// use memcmp_runtime::orchestrator::{MemoryComparison, SourcePlan};
///
/// # async fn demo() {
/// let comparison = MemoryComparison::new(SystemSources, SysconfCounters, SourcePlan::default());
/// let report = comparison.run().await;
/// println!("{} readings", report.readings.len());
/// # }
/// ```
#[derive(Debug)]
pub struct MemoryComparison<O, C> {
    opener: O,
    counters: C,
    plan: SourcePlan,
}

impl<O: SourceOpener, C: PageCounters> MemoryComparison<O, C> {
    pub fn new(opener: O, counters: C, plan: SourcePlan) -> Self {
        Self {
            opener,
            counters,
            plan,
        }
    }

    /// Sample all sources in order and build the report.
    ///
    /// Never fails: an unreadable source shows up as a not-found reading.
    pub async fn run(&self) -> ComparisonReport {
        tracing::info!(lgroup = %self.plan.lgroup, prtconf = %self.plan.prtconf, "sampling memory sources");

        let lgroup = read_root_group(&self.opener, &self.plan.lgroup).await;
        let prtconf = read_memory_size(&self.opener, &self.plan.prtconf).await;
        let sysconf = read_page_counters(&self.counters);

        let report = reconcile(sysconf, vec![lgroup, prtconf]);
        for reading in report.missing() {
            tracing::warn!(source = %reading.source_name, "source reported no memory size");
        }
        report
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

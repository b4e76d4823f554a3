//! Reporter for the memory size comparison tool.
//!
//! Turns a finished [`ComparisonReport`] into the text printed on stdout,
//! either the classic five-line listing or a JSON document.

pub mod json_view;
pub mod text_view;

use memcmp_core::error::Result;
use memcmp_core::models::ComparisonReport;
use memcmp_core::settings::OutputFormat;

pub use memcmp_core as core;

/// Render `report` in the requested format.
pub fn render(report: &ComparisonReport, format: OutputFormat, human: bool) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text_view::render_text(report, human)),
        OutputFormat::Json => json_view::render_json(report),
    }
}

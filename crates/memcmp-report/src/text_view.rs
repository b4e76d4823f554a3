//! Plain-text report, one value per line.
//!
//! The default rendering keeps the exact wording operators already grep for:
//!
//! ```text
//! Root lgroup memory size: 17072495001 bytes
//! prtconf memory size: 17179869184 bytes
//! Total system memory size (sysconf): 17179869184 bytes
//! Difference between sysconf and lgroup memory size: 107374183 bytes
//! Difference between sysconf and prtconf memory size: 0 bytes
//! ```

use std::fmt::Write;

use memcmp_core::formatting::format_binary_size;
use memcmp_core::models::{ByteCount, ComparisonReport, MemoryReading};

/// Render `report` as text. With `human` set, each line also carries the
/// value in binary units and missing sources are flagged.
pub fn render_text(report: &ComparisonReport, human: bool) -> String {
    let mut out = String::new();
    let Some((ground_truth, others)) = report.readings.split_first() else {
        return out;
    };

    for reading in others.iter().chain(std::iter::once(ground_truth)) {
        let line = format!("{}: {} bytes", reading_label(&reading.source_name), reading.bytes);
        push_line(&mut out, line, human.then(|| reading_note(reading)));
    }

    for delta in &report.deltas {
        let line = format!(
            "Difference between {} and {} memory size: {} bytes",
            ground_truth.source_name, delta.source_name, delta.bytes
        );
        push_line(&mut out, line, human.then(|| size_note(delta.bytes)));
    }

    out
}

/// Leading label for a reading line.
fn reading_label(source_name: &str) -> String {
    match source_name {
        "lgroup" => "Root lgroup memory size".to_string(),
        "sysconf" => "Total system memory size (sysconf)".to_string(),
        other => format!("{} memory size", other),
    }
}

fn reading_note(reading: &MemoryReading) -> String {
    if reading.found {
        size_note(reading.bytes)
    } else {
        "(not found)".to_string()
    }
}

fn size_note(bytes: ByteCount) -> String {
    format!("({})", format_binary_size(bytes))
}

fn push_line(out: &mut String, line: String, note: Option<String>) {
    match note {
        Some(note) => {
            let _ = writeln!(out, "{} {}", line, note);
        }
        None => {
            let _ = writeln!(out, "{}", line);
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

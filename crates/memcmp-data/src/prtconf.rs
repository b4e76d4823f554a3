//! Flat key/value reader for the device tree report.
//!
//! `prtconf -v` reports the installed memory as a single
//! `Memory size: 16384 Megabytes` line. The value is always in megabytes, so
//! the unit word after it is never consulted.

use memcmp_core::models::{ByteCount, MemoryReading};
use memcmp_core::units::{MegabyteParser, SizeParser};
use tracing::{debug, warn};

use crate::source::{SourceLocation, SourceOpener};

/// Source name used in readings and reports.
pub const SOURCE_NAME: &str = "prtconf";

/// Label prefix of the memory size line.
pub const MEMORY_SIZE_LABEL: &str = "Memory size:";

/// The utility invocation that produces the report.
pub fn default_location() -> SourceLocation {
    SourceLocation::command("prtconf", &["-v"])
}

/// Match one line against `label`.
///
/// Returns `None` when the line is not a labelled line with a value, in which
/// case scanning continues. Otherwise returns the parsed bytes, itself `None`
/// when the value is not a number.
pub fn match_field(line: &str, label: &str) -> Option<Option<ByteCount>> {
    let rest = line.trim_start().strip_prefix(label)?;
    let token = rest.split_whitespace().next()?;
    Some(MegabyteParser.try_parse(token))
}

/// Keeps the first labelled line of a flat report.
#[derive(Debug, Clone, Default)]
pub struct FieldScanner {
    matched: Option<Option<ByteCount>>,
}

impl FieldScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next report line. Returns `true` once a labelled line with a
    /// value has been seen.
    pub fn feed(&mut self, line: &str) -> bool {
        if self.matched.is_none() {
            self.matched = match_field(line, MEMORY_SIZE_LABEL);
        }
        self.matched.is_some()
    }

    /// `None` when no labelled line was seen, `Some(None)` when its value was
    /// not a number.
    pub fn into_matched(self) -> Option<Option<ByteCount>> {
        self.matched
    }
}

// ── Reader ────────────────────────────────────────────────────────────────────

/// Read the megabyte memory size from `location`.
///
/// The first labelled line wins; anything after it is left unread.
pub async fn read_memory_size<O: SourceOpener>(opener: &O, location: &SourceLocation) -> MemoryReading {
    let mut stream = match opener.open(location).await {
        Ok(stream) => stream,
        Err(e) => {
            warn!(error = %e, "device tree report unavailable");
            return MemoryReading::not_found(SOURCE_NAME);
        }
    };

    let mut scanner = FieldScanner::new();
    if let Err(e) = stream.scan(|line| scanner.feed(line)).await {
        warn!(error = %e, "stopped reading device tree report");
    }
    drop(stream);

    match scanner.into_matched() {
        Some(Some(bytes)) => {
            debug!(bytes, "prtconf memory size");
            MemoryReading::found(SOURCE_NAME, bytes)
        }
        Some(None) => {
            warn!(source = %location, "memory size value is not a number");
            MemoryReading::not_found(SOURCE_NAME)
        }
        None => {
            warn!(source = %location, "no memory size line");
            MemoryReading::not_found(SOURCE_NAME)
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySources;

    const PRTCONF: &str = "\
System Configuration:  Oracle Corporation  sun4v
Memory size: 16384 Megabytes
System Peripherals (Software Nodes):
";

    // ── match_field ───────────────────────────────────────────────────────────

    #[test]
    fn test_match_field_basic() {
        assert_eq!(
            match_field("Memory size: 8192 Megabytes", MEMORY_SIZE_LABEL),
            Some(Some(8_589_934_592))
        );
    }

    #[test]
    fn test_match_field_other_label() {
        assert_eq!(match_field("System Configuration: sun4v", MEMORY_SIZE_LABEL), None);
    }

    #[test]
    fn test_match_field_label_without_value_keeps_scanning() {
        assert_eq!(match_field("Memory size:   ", MEMORY_SIZE_LABEL), None);
    }

    #[test]
    fn test_match_field_garbled_value() {
        assert_eq!(
            match_field("Memory size: unknown Megabytes", MEMORY_SIZE_LABEL),
            Some(None)
        );
    }

    #[test]
    fn test_match_field_leading_whitespace() {
        assert_eq!(
            match_field("    Memory size: 1 Megabytes", MEMORY_SIZE_LABEL),
            Some(Some(1_048_576))
        );
    }

    // ── FieldScanner ──────────────────────────────────────────────────────────

    #[test]
    fn test_field_scanner_first_match_wins() {
        let mut scanner = FieldScanner::new();
        assert!(!scanner.feed("System Configuration: sun4v"));
        assert!(scanner.feed("Memory size: 4096 Megabytes"));
        assert!(scanner.feed("Memory size: 8192 Megabytes"));
        assert_eq!(scanner.into_matched(), Some(Some(4096 * 1_048_576)));
    }

    #[test]
    fn test_field_scanner_skips_label_without_value() {
        let mut scanner = FieldScanner::new();
        assert!(!scanner.feed("Memory size:"));
        assert!(scanner.feed("Memory size: 2048 Megabytes"));
        assert_eq!(scanner.into_matched(), Some(Some(2048 * 1_048_576)));
    }

    #[test]
    fn test_field_scanner_no_match() {
        let mut scanner = FieldScanner::new();
        scanner.feed("System Configuration: sun4v");
        assert_eq!(scanner.into_matched(), None);
    }

    // ── read_memory_size ──────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_read_memory_size_found() {
        let location = default_location();
        let sources = MemorySources::new().with(location.clone(), PRTCONF);

        let reading = read_memory_size(&sources, &location).await;
        assert_eq!(reading, MemoryReading::found(SOURCE_NAME, 17_179_869_184));
    }

    #[tokio::test]
    async fn test_read_memory_size_stops_at_first_match() {
        let location = default_location();
        let text = "Memory size: 8192 Megabytes\nMemory size: 16384 Megabytes\n";
        let sources = MemorySources::new().with(location.clone(), text);

        let reading = read_memory_size(&sources, &location).await;
        assert_eq!(reading.bytes, 8_589_934_592);
    }

    #[tokio::test]
    async fn test_read_memory_size_survives_non_utf8_line() {
        let location = default_location();
        let text = &b"System Configuration:  Soci\xe9t\xe9  sun4v\nMemory size: 16384 Megabytes\n"[..];
        let sources = MemorySources::new().with(location.clone(), text);

        let reading = read_memory_size(&sources, &location).await;
        assert_eq!(reading, MemoryReading::found(SOURCE_NAME, 17_179_869_184));
    }

    #[tokio::test]
    async fn test_read_memory_size_garbled_is_not_found() {
        let location = default_location();
        let text = "Memory size: ??? Megabytes\nMemory size: 8192 Megabytes\n";
        let sources = MemorySources::new().with(location.clone(), text);

        let reading = read_memory_size(&sources, &location).await;
        assert_eq!(reading, MemoryReading::not_found(SOURCE_NAME));
    }

    #[tokio::test]
    async fn test_read_memory_size_unavailable() {
        let reading = read_memory_size(&MemorySources::new(), &default_location()).await;
        assert_eq!(reading, MemoryReading::not_found(SOURCE_NAME));
    }
}

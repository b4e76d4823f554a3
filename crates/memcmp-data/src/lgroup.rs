//! Root locality-group reader.
//!
//! `lgrpinfo -a` prints one indented block per locality group:
//!
//! ```text
//! lgroup 0 (root):
//!         Children: 1 2
//!         CPUs: 0-63
//!         Memory: installed 64G, allocated 3.2G, free 61G
//! lgroup 1 (leaf):
//!         ...
//! ```
//!
//! Only the `Memory: installed` figure inside the root block is of interest.
//! [`RootGroupScanner`] tracks whether the root marker has been seen yet, so an
//! identical label in any earlier block is never taken.

use memcmp_core::models::{ByteCount, MemoryReading};
use memcmp_core::units::{SizeParser, UnitParser};
use tracing::{debug, warn};

use crate::source::{SourceLocation, SourceOpener};

/// Source name used in readings and reports.
pub const SOURCE_NAME: &str = "lgroup";

/// Text that opens the root group's block.
pub const ROOT_GROUP_MARKER: &str = "lgroup 0 (root)";

/// Label of the installed-memory attribute line.
pub const INSTALLED_LABEL: &str = "Memory: installed";

/// The utility invocation that produces the report.
pub fn default_location() -> SourceLocation {
    SourceLocation::command("lgrpinfo", &["-a"])
}

// ── RootGroupScanner ──────────────────────────────────────────────────────────

/// Progress of a root-group scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// The root marker has not been seen; every line is ignored.
    Searching,
    /// Inside the root block, waiting for the installed-memory line.
    InTargetBlock,
    /// The installed-memory line was found. `None` means its size token was
    /// missing or unparsable.
    Matched(Option<ByteCount>),
}

/// Line-at-a-time state machine over an `lgrpinfo` report.
#[derive(Debug, Clone)]
pub struct RootGroupScanner {
    state: ScanState,
}

impl Default for RootGroupScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl RootGroupScanner {
    pub fn new() -> Self {
        Self {
            state: ScanState::Searching,
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Feed the next report line. Returns `true` once the scan is complete and
    /// no further lines need to be read.
    pub fn feed(&mut self, line: &str) -> bool {
        match self.state {
            ScanState::Matched(_) => return true,
            ScanState::Searching => {
                if !line.contains(ROOT_GROUP_MARKER) {
                    return false;
                }
                debug!("entered root lgroup block");
                self.state = ScanState::InTargetBlock;
            }
            ScanState::InTargetBlock => {}
        }

        // The marker line itself is checked for the label as well.
        if line.contains(INSTALLED_LABEL) {
            let bytes = installed_token(line).and_then(|token| UnitParser.try_parse(token));
            self.state = ScanState::Matched(bytes);
            return true;
        }
        false
    }

    /// Installed bytes, or `None` when no usable value was found.
    pub fn into_bytes(self) -> Option<ByteCount> {
        match self.state {
            ScanState::Matched(bytes) => bytes,
            ScanState::Searching | ScanState::InTargetBlock => None,
        }
    }
}

/// The whitespace-delimited token following the word `installed`.
fn installed_token(line: &str) -> Option<&str> {
    let (_, rest) = line.split_once("installed")?;
    rest.split_whitespace().next()
}

// ── Reader ────────────────────────────────────────────────────────────────────

/// Read the root group's installed memory from `location`.
///
/// Any failure to open or read the source, a missing root block, and a
/// garbled size token all yield a not-found reading.
pub async fn read_root_group<O: SourceOpener>(opener: &O, location: &SourceLocation) -> MemoryReading {
    let mut stream = match opener.open(location).await {
        Ok(stream) => stream,
        Err(e) => {
            warn!(error = %e, "locality group report unavailable");
            return MemoryReading::not_found(SOURCE_NAME);
        }
    };

    let mut scanner = RootGroupScanner::new();
    if let Err(e) = stream.scan(|line| scanner.feed(line)).await {
        warn!(error = %e, "stopped reading locality group report");
    }
    drop(stream);

    match scanner.into_bytes() {
        Some(bytes) => {
            debug!(bytes, "root lgroup installed memory");
            MemoryReading::found(SOURCE_NAME, bytes)
        }
        None => {
            warn!(source = %location, "no installed memory for root lgroup");
            MemoryReading::not_found(SOURCE_NAME)
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

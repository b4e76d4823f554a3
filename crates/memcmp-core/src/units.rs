//! Size-token parsing.
//!
//! Memory sizes arrive as human-oriented text: `"64G"` from the locality-group
//! report, a bare `"16384"` megabyte figure from the device tree report. Both
//! parsers here reduce such tokens to an exact [`ByteCount`], truncating any
//! fractional byte toward zero. Neither ever fails; a token without a leading
//! magnitude yields the [`NOT_FOUND`] sentinel.

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::models::{ByteCount, NOT_FOUND};

/// Bytes in one binary kilobyte.
pub const KIB: f64 = 1024.0;
/// Bytes in one binary megabyte.
pub const MIB: f64 = KIB * 1024.0;
/// Bytes in one binary gigabyte.
pub const GIB: f64 = MIB * 1024.0;

/// Converts a textual size token into a byte count.
pub trait SizeParser {
    /// Parse `token`, or `None` when it has no leading magnitude.
    fn try_parse(&self, token: &str) -> Option<ByteCount>;

    /// Parse `token`, returning [`NOT_FOUND`] when no magnitude is present.
    fn parse(&self, token: &str) -> ByteCount {
        self.try_parse(token).unwrap_or(NOT_FOUND)
    }
}

/// Parser for `<magnitude><optional unit>` tokens such as `"4.0G"` or `"512m"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitParser;

/// Parser for bare magnitudes already known to be expressed in megabytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct MegabyteParser;

impl SizeParser for UnitParser {
    fn try_parse(&self, token: &str) -> Option<ByteCount> {
        let Some((magnitude, unit)) = split_magnitude(token) else {
            debug!(token, "no magnitude in size token");
            return None;
        };
        Some(to_bytes(magnitude * unit_multiplier(unit)))
    }
}

impl SizeParser for MegabyteParser {
    fn try_parse(&self, token: &str) -> Option<ByteCount> {
        let Some((magnitude, _)) = split_magnitude(token) else {
            debug!(token, "no magnitude in megabyte token");
            return None;
        };
        Some(to_bytes(magnitude * MIB))
    }
}

/// Binary multiplier for a unit character. Anything outside K/M/G counts as
/// raw bytes.
pub fn unit_multiplier(unit: Option<char>) -> f64 {
    match unit {
        Some('K' | 'k') => KIB,
        Some('M' | 'm') => MIB,
        Some('G' | 'g') => GIB,
        _ => 1.0,
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn magnitude_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*((?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?)(.)?").expect("regex is valid")
    })
}

/// Split a token into its leading magnitude and the character right after it.
fn split_magnitude(token: &str) -> Option<(f64, Option<char>)> {
    let caps = magnitude_regex().captures(token)?;
    let magnitude: f64 = caps.get(1)?.as_str().parse().ok()?;
    let unit = caps.get(2).and_then(|m| m.as_str().chars().next());
    Some((magnitude, unit))
}

/// Truncate toward zero. `as` saturates on overflow and maps NaN to zero.
fn to_bytes(value: f64) -> ByteCount {
    value.trunc() as ByteCount
}

// ── Tests ──────────────────────────────────────────────────────────────────────

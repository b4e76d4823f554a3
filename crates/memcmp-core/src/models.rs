use serde::Serialize;

/// Canonical memory size in bytes.
pub type ByteCount = i64;

/// Sentinel byte count meaning "could not determine".
pub const NOT_FOUND: ByteCount = 0;

/// One source's view of the installed memory size.
///
/// `found` is what distinguishes a source that genuinely reported zero bytes
/// from one that could not be read; `bytes` alone cannot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemoryReading {
    /// Short name of the source, e.g. `"lgroup"`.
    #[serde(rename = "source")]
    pub source_name: String,
    /// Reported size in bytes, [`NOT_FOUND`] when `found` is false.
    pub bytes: ByteCount,
    /// Whether the source produced a value at all.
    pub found: bool,
}

impl MemoryReading {
    /// A reading whose source reported `bytes`.
    pub fn found(source_name: impl Into<String>, bytes: ByteCount) -> Self {
        Self {
            source_name: source_name.into(),
            bytes,
            found: true,
        }
    }

    /// A reading for a source that could not be read or matched.
    pub fn not_found(source_name: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            bytes: NOT_FOUND,
            found: false,
        }
    }
}

/// Signed difference between the ground truth and one other source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceDelta {
    /// Name of the compared source.
    #[serde(rename = "source")]
    pub source_name: String,
    /// `ground_truth.bytes - other.bytes`.
    pub bytes: ByteCount,
}

/// All readings of one run together with their deltas against ground truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonReport {
    /// Ground-truth reading first, then the others in comparison order.
    pub readings: Vec<MemoryReading>,
    /// One delta per non-ground-truth reading, in the same order.
    pub deltas: Vec<SourceDelta>,
}

impl ComparisonReport {
    /// The reading every delta is computed against.
    pub fn ground_truth(&self) -> Option<&MemoryReading> {
        self.readings.first()
    }

    /// Look up a reading by source name.
    pub fn reading(&self, source_name: &str) -> Option<&MemoryReading> {
        self.readings.iter().find(|r| r.source_name == source_name)
    }

    /// Look up the delta computed for `source_name`.
    pub fn delta_for(&self, source_name: &str) -> Option<ByteCount> {
        self.deltas
            .iter()
            .find(|d| d.source_name == source_name)
            .map(|d| d.bytes)
    }

    /// Readings whose source produced no value.
    pub fn missing(&self) -> Vec<&MemoryReading> {
        self.readings.iter().filter(|r| !r.found).collect()
    }
}

//! Delta computation against the ground-truth reading.

use memcmp_core::models::{ComparisonReport, MemoryReading, SourceDelta};

/// Build a [`ComparisonReport`] from the ground truth and the other readings.
///
/// Every delta is `ground_truth.bytes - other.bytes`, signed and unclamped. A
/// not-found reading still gets a delta, equal to the ground truth itself;
/// consumers must check [`MemoryReading::found`] rather than infer absence from
/// the delta's magnitude.
pub fn reconcile(ground_truth: MemoryReading, others: Vec<MemoryReading>) -> ComparisonReport {
    let deltas = others
        .iter()
        .map(|other| SourceDelta {
            source_name: other.source_name.clone(),
            bytes: ground_truth.bytes - other.bytes,
        })
        .collect();

    let mut readings = Vec::with_capacity(others.len() + 1);
    readings.push(ground_truth);
    readings.extend(others);

    ComparisonReport { readings, deltas }
}

use memcmp_core::error::Result;
use memcmp_core::models::ComparisonReport;

/// Render `report` as a pretty-printed JSON document terminated by a newline.
pub fn render_json(report: &ComparisonReport) -> Result<String> {
    let mut json = serde_json::to_string_pretty(report)?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use memcmp_core::models::{MemoryReading, SourceDelta};

    #[test]
    fn test_render_json_shape() {
        let report = ComparisonReport {
            readings: vec![MemoryReading::found("sysconf", 1000), MemoryReading::not_found("prtconf")],
            deltas: vec![SourceDelta {
                source_name: "prtconf".to_string(),
                bytes: 1000,
            }],
        };

        let json = render_json(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["readings"][0]["source"], "sysconf");
        assert_eq!(value["readings"][0]["bytes"], 1000);
        assert_eq!(value["readings"][1]["found"], false);
        assert_eq!(value["deltas"][0]["source"], "prtconf");
        assert!(json.ends_with('\n'));
    }
}

//! JSON output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::stats::StatsReport;

/// Writes the full report to a pretty-printed JSON file.
///
/// # Format
/// ```json
/// {
///   "participants": [{"name": "Ana", "message_count": 1, ...}],
///   "months": [...],
///   "hours": [...],
///   "weekdays": [...],
///   "mentions": {"most_mentioned": null, "top": [], "edges": []}
/// }
/// ```
pub fn write_json(report: &StatsReport, path: impl AsRef<Path>) -> Result<()> {
    let json = to_json(report)?;
    let mut file = File::create(path.as_ref())?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts the report to a JSON string.
pub fn to_json(report: &StatsReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::parser::TranscriptParser;
    use crate::stats::StatsAggregator;

    #[test]
    fn test_to_json_roundtrip() {
        let config = AnalysisConfig::default();
        let records = TranscriptParser::new(&config).parse_lines([
            "01/01/24, 10:00 - Ana: hola Pablo",
            "01/01/24, 10:01 - Pablo: que tal",
        ]);
        let report = StatsAggregator::new(&config).analyze(&records);

        let json = to_json(&report).unwrap();
        assert!(json.contains("\"most_mentioned\""));
        let parsed: StatsReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn test_empty_report_has_null_most_mentioned() {
        let json = to_json(&StatsReport::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["mentions"]["most_mentioned"].is_null());
        assert_eq!(value["participants"].as_array().unwrap().len(), 0);
    }
}

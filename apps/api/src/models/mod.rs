pub mod comparison;
pub mod report;

use serde::{Deserialize, Serialize};

pub use comparison::ComparisonData;
pub use report::{QuizQuestion, ReportData};

/// Anything the UI can export, tagged by which kind of result produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExportRecord {
    Analysis(ReportData),
    Comparison(ComparisonData),
}

impl ExportRecord {
    pub fn kind(&self) -> &'static str {
        match self {
            ExportRecord::Analysis(_) => "analysis",
            ExportRecord::Comparison(_) => "comparison",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_export_record_analysis_tag() {
        let record: ExportRecord = serde_json::from_value(json!({
            "kind": "analysis",
            "summary": "Short."
        }))
        .unwrap();
        match record {
            ExportRecord::Analysis(data) => assert_eq!(data.summary.as_deref(), Some("Short.")),
            other => panic!("expected analysis, got {other:?}"),
        }
    }

    #[test]
    fn test_export_record_comparison_tag() {
        let record: ExportRecord = serde_json::from_value(json!({
            "kind": "comparison",
            "similarity_score": 72.5,
            "comparison_summary": "Mostly overlapping."
        }))
        .unwrap();
        assert_eq!(record.kind(), "comparison");
    }

    #[test]
    fn test_export_record_requires_kind() {
        let result: Result<ExportRecord, _> = serde_json::from_value(json!({ "summary": "x" }));
        assert!(result.is_err());
    }
}

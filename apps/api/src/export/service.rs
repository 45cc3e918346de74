//! Export orchestration shared by the HTTP handlers.
//!
//! A fresh composer, cursor and document are built for every export; nothing
//! is cached between calls. Layout is deterministic, so a failed encode is
//! reported rather than retried.

use chrono::NaiveDate;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::layout::{Document, PageGeometry, ReportComposer, StandardFonts};
use crate::models::ExportRecord;
use crate::render::pdf;

/// An encoded export ready to be sent as a download.
#[derive(Debug, Clone)]
pub struct RenderedExport {
    pub filename: String,
    pub page_count: usize,
    pub bytes: Vec<u8>,
}

/// Rejects records the composer cannot label faithfully.
pub fn validate(record: &ExportRecord) -> Result<(), AppError> {
    match record {
        ExportRecord::Analysis(data) => data.validate().map_err(AppError::Validation),
        ExportRecord::Comparison(data) => {
            if data.similarity_score.is_finite() {
                Ok(())
            } else {
                Err(AppError::Validation(
                    "similarity_score must be a finite number".to_string(),
                ))
            }
        }
    }
}

/// Lays out a record without encoding it.
pub fn compose(record: &ExportRecord, geometry: PageGeometry, generated_on: NaiveDate) -> Document {
    ReportComposer::new(&StandardFonts, geometry, generated_on).compose(record)
}

/// Lays out and encodes a record as PDF.
pub fn render(
    record: &ExportRecord,
    geometry: PageGeometry,
    generated_on: NaiveDate,
) -> Result<RenderedExport, AppError> {
    let document = compose(record, geometry, generated_on);
    let bytes =
        pdf::encode(&document, &StandardFonts).map_err(|e| AppError::Render(e.to_string()))?;

    Ok(RenderedExport {
        filename: document.filename.clone(),
        page_count: document.page_count(),
        bytes,
    })
}

/// Validates, then renders on the blocking pool.
pub async fn export_pdf(
    record: ExportRecord,
    geometry: PageGeometry,
    generated_on: NaiveDate,
) -> Result<RenderedExport, AppError> {
    validate(&record)?;
    let export_id = Uuid::new_v4();
    let kind = record.kind();

    let rendered = tokio::task::spawn_blocking(move || render(&record, geometry, generated_on))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in PDF export: {e}")))??;

    info!(
        %export_id,
        kind,
        pages = rendered.page_count,
        bytes = rendered.bytes.len(),
        "PDF export rendered"
    );
    Ok(rendered)
}

/// Validates, then composes on the blocking pool and returns the page layout.
pub async fn export_layout(
    record: ExportRecord,
    geometry: PageGeometry,
    generated_on: NaiveDate,
) -> Result<Document, AppError> {
    validate(&record)?;
    let export_id = Uuid::new_v4();
    let kind = record.kind();

    let document = tokio::task::spawn_blocking(move || compose(&record, geometry, generated_on))
        .await
        .map_err(|e| {
            AppError::Internal(anyhow::anyhow!("spawn_blocking failed in layout export: {e}"))
        })?;

    info!(%export_id, kind, pages = document.page_count(), "Layout export composed");
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{page_geometry, PageSize};
    use crate::models::{ComparisonData, QuizQuestion, ReportData};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 30).unwrap()
    }

    #[test]
    fn test_validate_rejects_oversized_quiz() {
        let record = ExportRecord::Analysis(ReportData {
            quiz_questions: vec![QuizQuestion {
                question: "Too many".to_string(),
                options: vec!["o".to_string(); 30],
                correct_answer: None,
            }],
            ..Default::default()
        });
        assert!(matches!(validate(&record), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_nan_similarity() {
        let record = ExportRecord::Comparison(ComparisonData {
            similarity_score: f32::NAN,
            ..Default::default()
        });
        assert!(matches!(validate(&record), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_render_analysis_uses_report_filename() {
        let record = ExportRecord::Analysis(ReportData::default());
        let rendered = render(&record, page_geometry(PageSize::A4), date()).unwrap();
        assert_eq!(rendered.filename, "note-analysis-report.pdf");
        assert_eq!(rendered.page_count, 1);
        assert!(rendered.bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_letter_geometry_is_used() {
        let record = ExportRecord::Analysis(ReportData::default());
        let document = compose(&record, page_geometry(PageSize::Letter), date());
        assert_eq!(document.geometry.height, 279.4);
    }

    #[tokio::test]
    async fn test_export_pdf_runs_on_blocking_pool() {
        let record = ExportRecord::Comparison(ComparisonData {
            similarity_score: 41.0,
            comparison_summary: Some("Partial overlap.".to_string()),
            ..Default::default()
        });
        let rendered = export_pdf(record, page_geometry(PageSize::A4), date())
            .await
            .unwrap();
        assert_eq!(rendered.filename, "note-comparison-report.pdf");
    }
}

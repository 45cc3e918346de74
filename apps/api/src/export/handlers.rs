//! Axum route handlers for the Export API.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use chrono::Local;

use crate::errors::AppError;
use crate::export::service::{export_layout, export_pdf};
use crate::layout::Document;
use crate::models::ExportRecord;
use crate::state::AppState;

/// POST /api/v1/export/pdf
///
/// Lays out the posted analysis or comparison and returns it as a PDF download.
pub async fn handle_export_pdf(
    State(state): State<AppState>,
    Json(record): Json<ExportRecord>,
) -> Result<Response, AppError> {
    let today = Local::now().date_naive();
    let rendered = export_pdf(record, state.page_geometry, today).await?;

    let disposition = format!("attachment; filename=\"{}\"", rendered.filename);
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        Bytes::from(rendered.bytes),
    )
        .into_response())
}

/// POST /api/v1/export/layout
///
/// Returns the paginated layout as JSON, for previews and debugging page breaks.
pub async fn handle_export_layout(
    State(state): State<AppState>,
    Json(record): Json<ExportRecord>,
) -> Result<Json<Document>, AppError> {
    let today = Local::now().date_naive();
    let document = export_layout(record, state.page_geometry, today).await?;
    Ok(Json(document))
}

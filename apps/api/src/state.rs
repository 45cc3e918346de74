use crate::config::Config;
use crate::layout::PageGeometry;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Config,
    /// Page dimensions every export is laid out on, derived from `REPORT_PAGE_SIZE`.
    pub page_geometry: PageGeometry,
}

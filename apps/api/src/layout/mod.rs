// Report layout engine.
// Implements: font metrics, text flow, page cursor, and the section composer.
// Composition is pure and CPU-bound; HTTP callers run it inside tokio::task::spawn_blocking.

pub mod composer;
pub mod cursor;
pub mod document;
pub mod font_metrics;
pub mod text_flow;

// Re-export the public API consumed by the export service and the encoder.
pub use composer::ReportComposer;
pub use document::Document;
pub use font_metrics::{page_geometry, PageGeometry, PageSize, StandardFonts};

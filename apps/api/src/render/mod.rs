// Document encoding.
// Turns a composed `Document` into bytes the browser can save.

pub mod pdf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF library error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

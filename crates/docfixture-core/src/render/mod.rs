//! Serializers turning fixture content into file bytes.

pub mod docx;
pub mod pdf;

use thiserror::Error;

use crate::fixtures::FixtureContent;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("docx packaging failed: {0}")]
    Pack(String),
}

/// Render any fixture to the bytes of its on-disk format.
pub fn render(content: &FixtureContent) -> Result<Vec<u8>, RenderError> {
    match content {
        FixtureContent::Docx(doc) => docx::render_docx(doc),
        FixtureContent::Pdf(page) => Ok(pdf::render_pdf(page)),
    }
}

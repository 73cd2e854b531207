//! Report rendering contract.

use crate::error::RenderError;
use crate::result::AnalysisResult;

/// Turns an [`AnalysisResult`] into a distributable document.
///
/// Implementations must tolerate empty fields (no summary text, no clauses,
/// no entities) by rendering placeholders rather than failing.
pub trait ReportRenderer {
    /// MIME type of the rendered bytes.
    fn content_type(&self) -> &'static str;

    /// Conventional file extension, without the dot.
    fn extension(&self) -> &'static str;

    fn render(&self, result: &AnalysisResult) -> Result<Vec<u8>, RenderError>;
}

//! Resume upload checks.

use serde::Serialize;

use crate::error::ResumeError;

/// File formats accepted by the resume uploader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResumeFormat {
    Pdf,
    Docx,
}

impl ResumeFormat {
    /// Detect the format from a filename extension, ignoring case.
    pub fn from_filename(filename: &str) -> Result<Self, ResumeError> {
        let extension = std::path::Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("pdf") => Ok(Self::Pdf),
            Some("docx") => Ok(Self::Docx),
            _ => Err(ResumeError::UnsupportedType {
                filename: filename.to_string(),
            }),
        }
    }
}

//! Error types for notice generation and export.

use std::path::PathBuf;

use thiserror::Error;

use crate::render_pdf::PdfError;
use crate::types::FormField;

/// Result type alias for notice operations.
pub type Result<T> = std::result::Result<T, NoticeError>;

/// Errors surfaced at the export-channel boundary.
#[derive(Debug, Error)]
pub enum NoticeError {
    /// One or more required form fields are empty.
    #[error("required fields missing: {}", join_fields(.missing))]
    IncompleteInput { missing: Vec<FormField> },

    /// Composed text did not parse into four notice lines.
    #[error("composed notice text is malformed")]
    MalformedComposedText,

    /// The host refused to open a print surface.
    #[error("print surface unavailable: {0}")]
    ExternalSurfaceUnavailable(String),

    /// PDF rasterisation failed.
    #[error(transparent)]
    Rasterization(#[from] PdfError),

    /// A generation is already running on this channel.
    #[error("a notice is already being generated")]
    Busy,

    /// Reading or writing a file failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration could not be loaded.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl NoticeError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Alert text for the person filling in the form.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::IncompleteInput { .. } => "Please fill all required fields first",
            Self::MalformedComposedText => "Error generating HTML. Please try again.",
            Self::ExternalSurfaceUnavailable(_) => {
                "Could not open the print preview. Please allow pop-ups and try again."
            }
            Self::Rasterization(PdfError::RendererUnavailable(_)) => {
                "The PDF renderer is not ready. Please try again in a moment."
            }
            Self::Rasterization(_) => "Error generating PDF. Please try again.",
            Self::Busy => "A notice is already being generated.",
            Self::Io { .. } => "Could not save the notice file.",
            Self::Config(_) => "The notice configuration is invalid.",
        }
    }
}

fn join_fields(fields: &[FormField]) -> String {
    fields
        .iter()
        .map(|f| f.name())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incomplete_input_lists_fields() {
        let err = NoticeError::IncompleteInput {
            missing: vec![FormField::Place, FormField::Date],
        };
        assert_eq!(err.to_string(), "required fields missing: place, date");
        assert_eq!(err.user_message(), "Please fill all required fields first");
    }

    #[test]
    fn renderer_unavailable_has_its_own_message() {
        let unavailable = NoticeError::from(PdfError::RendererUnavailable("no chrome".into()));
        let failed = NoticeError::from(PdfError::PdfGeneration("boom".into()));
        assert_ne!(unavailable.user_message(), failed.user_message());
        assert_eq!(failed.to_string(), "PDF generation failed: boom");
    }

    #[test]
    fn io_error_names_the_path() {
        let err = NoticeError::io(
            "/tmp/out/notice.html",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "I/O error on /tmp/out/notice.html: denied");
    }
}

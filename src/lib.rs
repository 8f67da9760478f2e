//! `notice-maker`: Malayalam death-notice generator.
//!
//! Turns a filled-in [`FormData`] into the traditional notice text with the
//! right word forms for the guardian's status and the deceased's relation,
//! lays four copies out on an A4 landscape sheet with cut guides, and exports
//! the sheet for printing or as PDF.
//!
//! # Quick start
//!
//! ```
//! use notice_maker::{FormData, Relation};
//!
//! let form = FormData {
//!     place: "Kozhikode".into(),
//!     guardian_name: "Ahmed".into(),
//!     relation: Relation::Daughter,
//!     deceased_name: "Fathima".into(),
//!     date: chrono::NaiveDate::from_ymd_opt(2024, 1, 15),
//!     ..FormData::default()
//! };
//! let notice = form.notice().unwrap();
//! assert_eq!(notice.greeting, "അസ്സലാമു അലൈകും");
//! assert!(notice.main_text.contains("Fathima"));
//! ```

pub mod compose;
pub mod config;
pub mod error;
pub mod export;
pub mod grammar;
pub mod layout;
pub mod parse;
pub mod render_html;
pub mod render_pdf;
#[cfg(feature = "terminal")]
pub mod render_term;
pub mod render_text;
pub mod session;
pub mod template;
pub mod types;
pub mod validate;

pub use compose::{compose_notice, compose_notice_text};
pub use config::NoticeConfig;
pub use error::*;
pub use export::{
    BrowserSurface, DirectorySink, DownloadSink, ExportFormat, GenerationState, GenerationTracker, PdfChannel,
    PrintChannel, PrintLifecycle, PrintOutcome, PrintSurface, document_title, file_name,
};
pub use layout::{FontKind, FontSizes, LayoutConfig, PageLayout, StyleVariant, render_layout};
pub use parse::parse_notice_content;
pub use render_html::PageConfig;
pub use render_pdf::{PdfConfig, PdfError, Rasterizer};
#[cfg(feature = "pdf")]
pub use render_pdf::ChromiumRasterizer;
pub use session::{FieldUpdate, NoticeSession};
pub use types::*;
pub use validate::{Validation, validate_form_data};

impl FormData {
    /// Composed notice text, or `""` while the form is incomplete.
    pub fn notice_text(&self) -> String {
        compose::compose_notice_text(self)
    }

    /// The four notice lines, or `None` while the form is incomplete.
    pub fn notice(&self) -> Option<NoticeContent> {
        compose::compose_notice(self)
    }

    pub fn validate(&self) -> Validation {
        validate::validate_form_data(self)
    }
}

impl NoticeContent {
    /// Lay out four copies of this notice on a sheet.
    pub fn layout(&self, config: &LayoutConfig, fonts: FontSizes) -> PageLayout {
        layout::render_layout(self, config, fonts)
    }

    /// Render a complete print document for this notice.
    pub fn to_html_page(&self, config: &LayoutConfig, fonts: FontSizes, page: &PageConfig) -> String {
        render_html::to_html_page(&self.layout(config, fonts), page)
    }

    /// Plain text with emphasis markup removed.
    pub fn to_plain_text(&self) -> String {
        render_text::to_plain_text(self)
    }

    /// Render this notice as ANSI-styled terminal text.
    #[cfg(feature = "terminal")]
    pub fn to_terminal(&self) -> String {
        render_term::to_terminal(self, render_term::DEFAULT_WIDTH)
    }
}

//! One editing session: the form being filled in plus display settings.
//!
//! Derived values (notice text, content, preview) are recomputed on every
//! read so they always reflect the current form.

use chrono::NaiveDate;

use crate::compose::{compose_notice, compose_notice_text};
use crate::layout::{FontKind, FontSizes, LayoutConfig};
use crate::render_html::to_preview_html;
use crate::types::{FormData, GuardianStatus, NoticeContent, Relation};
use crate::validate::{Validation, validate_form_data};

/// A single field edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    Place(String),
    GuardianName(String),
    GuardianStatus(GuardianStatus),
    Relation(Relation),
    DeceasedName(String),
    Date(Option<NaiveDate>),
}

#[derive(Debug, Clone, Default)]
pub struct NoticeSession {
    form: FormData,
    fonts: FontSizes,
    layout: LayoutConfig,
}

impl NoticeSession {
    pub fn new(layout: LayoutConfig, fonts: FontSizes) -> Self {
        Self {
            form: FormData::default(),
            fonts: fonts.clamped(),
            layout,
        }
    }

    pub fn form(&self) -> &FormData {
        &self.form
    }

    pub fn fonts(&self) -> FontSizes {
        self.fonts
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn update(&mut self, update: FieldUpdate) {
        log::trace!("form update: {update:?}");
        match update {
            FieldUpdate::Place(v) => self.form.place = v,
            FieldUpdate::GuardianName(v) => self.form.guardian_name = v,
            FieldUpdate::GuardianStatus(v) => self.form.guardian_status = v,
            FieldUpdate::Relation(v) => self.form.relation = v,
            FieldUpdate::DeceasedName(v) => self.form.deceased_name = v,
            FieldUpdate::Date(v) => self.form.date = v,
        }
    }

    /// Replace the whole form, e.g. after loading it from a file.
    pub fn load(&mut self, form: FormData) {
        self.form = form;
    }

    pub fn adjust_font(&mut self, kind: FontKind, delta: i32) {
        self.fonts.adjust(kind, delta);
    }

    /// Clear the form and restore default font sizes.
    pub fn reset(&mut self) {
        self.form = FormData::default();
        self.fonts.reset();
    }

    /// Composed notice text, empty while the form is incomplete.
    pub fn notice_text(&self) -> String {
        compose_notice_text(&self.form)
    }

    pub fn content(&self) -> Option<NoticeContent> {
        compose_notice(&self.form)
    }

    pub fn is_ready(&self) -> bool {
        self.form.is_complete()
    }

    pub fn validation(&self) -> Validation {
        validate_form_data(&self.form)
    }

    pub fn preview_html(&self) -> String {
        to_preview_html(&self.notice_text(), &self.layout, self.fonts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FormField;
    use pretty_assertions::assert_eq;

    fn filled() -> NoticeSession {
        let mut session = NoticeSession::default();
        session.update(FieldUpdate::Place("Kozhikode".into()));
        session.update(FieldUpdate::GuardianName("Ahmed".into()));
        session.update(FieldUpdate::DeceasedName("Fathima".into()));
        session.update(FieldUpdate::Relation(Relation::Daughter));
        session.update(FieldUpdate::Date(NaiveDate::from_ymd_opt(2024, 1, 15)));
        session
    }

    #[test]
    fn fresh_session_is_not_ready() {
        let session = NoticeSession::default();
        assert!(!session.is_ready());
        assert_eq!(session.notice_text(), "");
        assert!(session.content().is_none());
        assert!(session.preview_html().contains("notice-preview-empty"));
        assert_eq!(session.validation().missing_fields, FormField::REQUIRED.to_vec());
    }

    #[test]
    fn filled_session_previews_notice() {
        let session = filled();
        assert!(session.is_ready());
        assert!(session.notice_text().contains("Fathima"));
        assert!(session.preview_html().contains("notice-box"));
    }

    #[test]
    fn text_follows_edits() {
        let mut session = filled();
        session.update(FieldUpdate::GuardianStatus(GuardianStatus::DeceasedFemale));
        assert!(session.notice_text().contains("പരേതയായ "));
        session.update(FieldUpdate::Date(None));
        assert_eq!(session.notice_text(), "");
    }

    #[test]
    fn reset_clears_form_and_fonts() {
        let mut session = filled();
        session.adjust_font(FontKind::Base, 3);
        assert_eq!(session.fonts().base, 16);
        session.reset();
        assert_eq!(session.form(), &FormData::default());
        assert_eq!(session.fonts(), FontSizes::default());
    }
}

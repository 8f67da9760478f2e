//! Notice text composition.
//!
//! The composed text has four logical lines (greeting, body, two footer
//! lines) separated by blank lines. Each footer line holds a left and right
//! half joined by [`FOOTER_DELIMITER`]; [`crate::parse`] splits on it.

use chrono::NaiveDate;

use crate::grammar::{day_name, resolve_guardian_prefix, resolve_possessive_form};
use crate::template::TemplateContext;
use crate::types::{FormData, NoticeContent};

/// Separator between the two halves of a footer line. Field values are
/// whitespace-normalised before interpolation so no field can contain a run
/// this wide.
pub const FOOTER_DELIMITER: &str = "                ";

/// Opening salutation, always the first line.
pub const GREETING: &str = "അസ്സലാമു അലൈകും";

/// Closing signature on the right of the first footer line.
pub const CLOSING_SIGNATURE: &str = "എന്ന്";

/// "Family members", right of the second footer line.
pub const FAMILY_MEMBERS: &str = "കുടുംബാംഗങ്ങൾ";

/// Opening tag of the emphasis markup wrapped around interpolated fields.
pub const EMPHASIS_OPEN: &str = "<span style=\"font-weight: 800;\">";
pub const EMPHASIS_CLOSE: &str = "</span>";

const BODY_TEMPLATE: &str = concat!(
    "<span style=\"font-weight: 800;\">{= place =}</span> സ്വദേശി ",
    "<span style=\"font-weight: 800;\">{= guardian_prefix =}</span>",
    "<span style=\"font-weight: 800;\">{= guardian_name =}</span> എന്നവരുടെ ",
    "<span style=\"font-weight: 800;\">{= relation =}</span> ",
    "<span style=\"font-weight: 800;\">{= deceased_name =}</span> എന്നവർ ",
    "<span style=\"font-weight: 800;\">{= date =}</span> ന് ",
    "(<span style=\"font-weight: 800;\">{= day =}</span>) ",
    "മരണപ്പെട്ട വിവരം അറിയിക്കുന്നതോടൊപ്പം {= possessive =} പേരിൽ ",
    "ജനാസ നിസ്‌കരിക്കാനും പ്രാർത്തിക്കാനും അഭ്യർത്ഥിക്കുന്നു.",
);

const FOOTER1_TEMPLATE: &str = concat!(
    "<span style=\"font-weight: 800;\">{= place =}-{= guardian_prefix =}{= guardian_name =}</span>",
    "{= delimiter =}",
    "<span style=\"font-weight: 800;\">{= closing =}</span>",
);

const FOOTER2_TEMPLATE: &str = concat!(
    "<span style=\"font-weight: 800;\">{= date =}</span>",
    "{= delimiter =}",
    "<span style=\"font-weight: 800;\">{= family =}</span>",
);

/// Compose the notice as flat text, or `""` when a required field is missing.
pub fn compose_notice_text(form: &FormData) -> String {
    match compose_notice(form) {
        Some(content) => join_notice(&content),
        None => String::new(),
    }
}

/// Compose the notice directly into its four structural lines.
pub fn compose_notice(form: &FormData) -> Option<NoticeContent> {
    let date = form.date?;
    if !form.is_complete() {
        return None;
    }

    let ctx = notice_context(form, date);
    let content = NoticeContent {
        greeting: GREETING.to_string(),
        main_text: ctx.resolve(BODY_TEMPLATE),
        footer_line1: ctx.resolve(FOOTER1_TEMPLATE),
        footer_line2: ctx.resolve(FOOTER2_TEMPLATE),
    };
    log::debug!(
        "composed notice for {} ({} body chars)",
        form.place.trim(),
        content.main_text.chars().count()
    );
    Some(content)
}

/// Serialise structured content into the flat text layout: greeting, two
/// blank lines, body, two blank lines, both footer lines.
pub fn join_notice(content: &NoticeContent) -> String {
    format!(
        "{}\n\n\n{}\n\n\n{}\n{}",
        content.greeting, content.main_text, content.footer_line1, content.footer_line2
    )
}

/// Format a date as `dd/mm/yyyy`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Wrap already-escaped text in the emphasis markup.
pub fn emphasis(text: &str) -> String {
    format!("{EMPHASIS_OPEN}{text}{EMPHASIS_CLOSE}")
}

fn notice_context(form: &FormData, date: NaiveDate) -> TemplateContext {
    let possessive = resolve_possessive_form(form.deceased_gender());

    let mut ctx = TemplateContext::new();
    ctx.insert("place", normalize_field(&form.place))
        .insert("guardian_prefix", resolve_guardian_prefix(form.guardian_status))
        .insert("guardian_name", normalize_field(&form.guardian_name))
        .insert("relation", form.relation.label())
        .insert("deceased_name", normalize_field(&form.deceased_name))
        .insert("date", format_date(date))
        .insert("day", day_name(date))
        .insert("possessive", possessive)
        .insert("closing", CLOSING_SIGNATURE)
        .insert("family", FAMILY_MEMBERS)
        .insert_markup("delimiter", FOOTER_DELIMITER);
    ctx
}

/// Trim and collapse internal whitespace (including line breaks) to single
/// spaces so field values never disturb the line or footer structure.
fn normalize_field(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

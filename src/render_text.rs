//! Plain-text degradation of a notice.
//!
//! Strips the emphasis markup and decodes the entities the composer
//! escaped, keeping the four-line structure and the footer delimiter so the
//! output stays human-editable and reparses with [`crate::parse`].

use crate::compose::FOOTER_DELIMITER;
use crate::types::NoticeContent;

/// Render `content` as plain text: greeting, body and both footer lines,
/// separated by blank lines the same way the composer separates them.
pub fn to_plain_text(content: &NoticeContent) -> String {
    let [first, second] = content.footers();
    let footer = |left: &str, right: &str| {
        if right.is_empty() {
            visible_text(left)
        } else {
            format!("{}{FOOTER_DELIMITER}{}", visible_text(left), visible_text(right))
        }
    };

    format!(
        "{}\n\n\n{}\n\n\n{}\n{}\n",
        visible_text(&content.greeting),
        visible_text(&content.main_text),
        footer(&first.left, &first.right),
        footer(&second.left, &second.right),
    )
}

/// Text a reader would see: tags removed, basic entities decoded.
pub fn visible_text(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut in_tag = false;
    for c in markup.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    decode_entities(&out)
}

fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::{compose_notice, emphasis};
    use crate::parse::parse_notice_content;
    use crate::types::FormData;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    #[test]
    fn strips_tags() {
        assert_eq!(visible_text(&emphasis("Kozhikode")), "Kozhikode");
        assert_eq!(
            visible_text("<span style=\"font-weight: 800;\"></span><span>Ahmed</span> എന്നവരുടെ"),
            "Ahmed എന്നവരുടെ"
        );
    }

    #[test]
    fn decodes_entities_once() {
        assert_eq!(visible_text("Tom &amp; Jerry &lt;3"), "Tom & Jerry <3");
        assert_eq!(visible_text("&amp;lt;"), "&lt;");
    }

    #[test]
    fn plain_text_reparses() {
        let form = FormData {
            place: "Ponnani".into(),
            guardian_name: "Kunhimoideen".into(),
            deceased_name: "Ayisha".into(),
            relation: crate::types::Relation::Wife,
            date: NaiveDate::from_ymd_opt(2024, 2, 29),
            ..FormData::default()
        };
        let content = compose_notice(&form).unwrap();
        let plain = to_plain_text(&content);
        assert!(!plain.contains("<span"));

        let reparsed = parse_notice_content(&plain).unwrap();
        assert_eq!(reparsed.greeting, content.greeting);
        assert_eq!(reparsed.main_text, visible_text(&content.main_text));
        let footers = reparsed.footers();
        assert_eq!(footers[0].left, "Ponnani-Kunhimoideen");
        assert_eq!(footers[1].left, "29/02/2024");
        assert_eq!(footers[1].right, "കുടുംബാംഗങ്ങൾ");
    }
}

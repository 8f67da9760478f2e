//! Splits composed notice text back into its structural parts.

use crate::types::{FooterLine, NoticeContent};

/// Minimum run of consecutive spaces that separates footer halves.
pub const MIN_FOOTER_GAP: usize = 16;

/// Parse flat notice text into its four lines.
///
/// Blank lines are dropped. Fewer than four remaining lines yields `None`;
/// lines past the fourth are ignored.
pub fn parse_notice_content(text: &str) -> Option<NoticeContent> {
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());

    let greeting = lines.next()?;
    let main_text = lines.next()?;
    let footer_line1 = lines.next()?;
    let footer_line2 = lines.next()?;

    let ignored = lines.count();
    if ignored > 0 {
        log::debug!("ignoring {ignored} trailing notice line(s)");
    }

    Some(NoticeContent {
        greeting: greeting.to_string(),
        main_text: main_text.to_string(),
        footer_line1: footer_line1.to_string(),
        footer_line2: footer_line2.to_string(),
    })
}

/// Split a footer line on its first run of at least [`MIN_FOOTER_GAP`]
/// spaces. Without such a run the whole line is the left half.
pub fn split_footer(line: &str) -> FooterLine {
    match find_gap(line) {
        Some((start, end)) => FooterLine {
            left: line[..start].to_string(),
            right: line[end..].to_string(),
        },
        None => FooterLine {
            left: line.to_string(),
            right: String::new(),
        },
    }
}

/// Byte range of the first maximal space run of length >= MIN_FOOTER_GAP.
fn find_gap(line: &str) -> Option<(usize, usize)> {
    let bytes = line.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b' ' {
            i += 1;
            continue;
        }
        let start = i;
        while i < bytes.len() && bytes[i] == b' ' {
            i += 1;
        }
        if i - start >= MIN_FOOTER_GAP {
            return Some((start, i));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn gap(n: usize) -> String {
        " ".repeat(n)
    }

    #[test]
    fn parses_four_lines_skipping_blanks() {
        let text = "greeting\n\n\nbody\n  \n\nleft one                right one\nleft two                right two";
        let content = parse_notice_content(text).unwrap();
        assert_eq!(content.greeting, "greeting");
        assert_eq!(content.main_text, "body");
        assert_eq!(content.footer_line1, "left one                right one");
        assert_eq!(content.footer_line2, "left two                right two");
    }

    #[test]
    fn fewer_than_four_lines_is_none() {
        assert_eq!(parse_notice_content(""), None);
        assert_eq!(parse_notice_content("a\n\nb\n\nc"), None);
        assert_eq!(parse_notice_content("\n \n\t\n"), None);
    }

    #[test]
    fn extra_lines_are_ignored() {
        let content = parse_notice_content("a\nb\nc\nd\ne\nf").unwrap();
        assert_eq!(content.footer_line2, "d");
    }

    #[test]
    fn crlf_line_endings() {
        let content = parse_notice_content("a\r\n\r\nb\r\nc\r\nd").unwrap();
        assert_eq!(content.main_text, "b");
        assert_eq!(content.footer_line2, "d");
    }

    #[test]
    fn split_on_exact_gap() {
        let line = format!("Kozhikode-Ahmed{}എന്ന്", gap(16));
        assert_eq!(
            split_footer(&line),
            FooterLine { left: "Kozhikode-Ahmed".into(), right: "എന്ന്".into() }
        );
    }

    #[test]
    fn split_consumes_the_whole_run() {
        let line = format!("left{}right", gap(30));
        assert_eq!(split_footer(&line), FooterLine { left: "left".into(), right: "right".into() });
    }

    #[test]
    fn short_runs_do_not_split() {
        let line = format!("Kozhikode Beach{}Road", gap(15));
        assert_eq!(split_footer(&line), FooterLine { left: line.clone(), right: String::new() });
    }

    #[test]
    fn splits_on_first_qualifying_run_only() {
        let line = format!("a  b{}c{}d", gap(16), gap(20));
        let footer = split_footer(&line);
        assert_eq!(footer.left, "a  b");
        assert_eq!(footer.right, format!("c{}d", gap(20)));
    }

    #[test]
    fn tabs_are_not_delimiters() {
        let line = format!("a{}b", "\t".repeat(20));
        assert_eq!(split_footer(&line).right, "");
    }
}

//! ANSI terminal preview of a notice.
//!
//! Emphasised fields are printed bold, the greeting is centred and the body
//! is word-wrapped to the requested width. Footer halves are pushed to the
//! left and right edges like the printed cell.

use colored::Colorize;

use crate::compose::{EMPHASIS_CLOSE, EMPHASIS_OPEN};
use crate::render_text::visible_text;
use crate::types::NoticeContent;

/// Default wrap width in columns.
pub const DEFAULT_WIDTH: usize = 72;

struct Word {
    text: String,
    bold: bool,
}

/// Render `content` for a terminal `width` columns wide.
pub fn to_terminal(content: &NoticeContent, width: usize) -> String {
    let width = width.max(20);
    let rule = "─".repeat(width).dimmed().to_string();
    let mut out = String::new();

    out.push_str(&rule);
    out.push('\n');

    let greeting = visible_text(&content.greeting);
    let pad = width.saturating_sub(greeting.chars().count()) / 2;
    out.push_str(&" ".repeat(pad));
    out.push_str(&greeting.bold().green().to_string());
    out.push_str("\n\n");

    for line in wrap(&words(&content.main_text), width) {
        out.push_str(&line);
        out.push('\n');
    }
    out.push('\n');

    for footer in content.footers() {
        let left = visible_text(&footer.left);
        let right = visible_text(&footer.right);
        let used = left.chars().count() + right.chars().count();
        let gap = width.saturating_sub(used).max(2);
        out.push_str(&left.bold().to_string());
        out.push_str(&" ".repeat(gap));
        out.push_str(&right.bold().to_string());
        out.push('\n');
    }

    out.push_str(&rule);
    out.push('\n');
    out
}

/// Split markup into words, remembering which ones sat inside emphasis.
fn words(markup: &str) -> Vec<Word> {
    let mut words = Vec::new();
    let mut rest = markup;
    while !rest.is_empty() {
        let (plain, emphasised, tail) = match rest.find(EMPHASIS_OPEN) {
            Some(start) => {
                let inner = &rest[start + EMPHASIS_OPEN.len()..];
                match inner.find(EMPHASIS_CLOSE) {
                    Some(end) => (&rest[..start], &inner[..end], &inner[end + EMPHASIS_CLOSE.len()..]),
                    None => (&rest[..start], inner, ""),
                }
            }
            None => (rest, "", ""),
        };
        push_words(&mut words, plain, false);
        push_words(&mut words, emphasised, true);
        rest = tail;
    }
    words
}

fn push_words(words: &mut Vec<Word>, segment: &str, bold: bool) {
    for text in visible_text(segment).split_whitespace() {
        words.push(Word {
            text: text.to_string(),
            bold,
        });
    }
}

fn wrap(words: &[Word], width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut len = 0;
    for word in words {
        let n = word.text.chars().count();
        if len > 0 && len + 1 + n > width {
            lines.push(std::mem::take(&mut line));
            len = 0;
        }
        if len > 0 {
            line.push(' ');
            len += 1;
        }
        if word.bold {
            line.push_str(&word.text.bold().to_string());
        } else {
            line.push_str(&word.text);
        }
        len += n;
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

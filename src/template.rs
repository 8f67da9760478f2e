//! Placeholder interpolation for the notice template.
//!
//! Templates use `{= key =}` placeholders. Plain values are HTML-escaped on
//! the way in because the composed notice is later embedded verbatim in the
//! print document; markup values are inserted as-is.
//!
//! ```
//! use notice_maker::template::TemplateContext;
//!
//! let mut ctx = TemplateContext::new();
//! ctx.insert("place", "Kozhikode");
//! assert_eq!(ctx.resolve("<b>{= place =}</b>"), "<b>Kozhikode</b>");
//! ```

use std::collections::BTreeMap;

#[derive(Debug, Clone)]
enum Value {
    Text(String),
    Markup(String),
}

/// Variables for one template expansion.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    vars: BTreeMap<String, Value>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a text value (escaped on output). Returns `&mut Self` for chaining.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.vars.insert(key.into(), Value::Text(value.into()));
        self
    }

    /// Insert a markup fragment that is emitted without escaping.
    pub fn insert_markup(&mut self, key: impl Into<String>, markup: impl Into<String>) -> &mut Self {
        self.vars.insert(key.into(), Value::Markup(markup.into()));
        self
    }

    /// Replace every `{= key =}` in `template`.
    ///
    /// Missing keys expand to nothing and are logged; an unclosed `{=` is
    /// kept literally.
    pub fn resolve(&self, template: &str) -> String {
        let mut result = String::with_capacity(template.len() * 2);
        let mut rest = template;

        while let Some(start_pos) = rest.find("{=") {
            result.push_str(&rest[..start_pos]);

            let after_open = &rest[start_pos + 2..];
            let Some(end_pos) = after_open.find("=}") else {
                result.push_str("{=");
                rest = after_open;
                continue;
            };

            let key = after_open[..end_pos].trim();
            match self.vars.get(key) {
                Some(Value::Text(text)) => result.push_str(&escape_html(text)),
                Some(Value::Markup(markup)) => result.push_str(markup),
                None => log::debug!("template placeholder '{key}' has no value"),
            }
            rest = &after_open[end_pos + 2..];
        }

        result.push_str(rest);
        result
    }
}

/// Escape HTML special characters.
pub(crate) fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

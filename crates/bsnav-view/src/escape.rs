//! HTML escaping.

/// Escapes text for HTML content and attribute values.
pub trait Escaper: Send + Sync {
    /// Escape text placed between tags.
    fn escape_html(&self, s: &str) -> String;

    /// Escape text placed inside a double-quoted attribute value.
    fn escape_html_attr(&self, s: &str) -> String;
}

/// Default [`Escaper`] using [`escape_html`] for both contexts.
#[derive(Clone, Copy, Debug, Default)]
pub struct HtmlEscaper;

impl Escaper for HtmlEscaper {
    fn escape_html(&self, s: &str) -> String {
        escape_html(s)
    }

    fn escape_html_attr(&self, s: &str) -> String {
        escape_html(s)
    }
}

/// Escape `&`, `<`, `>`, `"` and `'`.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

//! Raw markup values and escaping helpers.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Pre-formed HTML, CSS or JavaScript that is inserted without escaping.
///
/// Wrapping a string in `RawHtml` is the caller's guarantee that the text is
/// safe to place in the document as is. The assembler never sanitizes it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawHtml(String);

impl RawHtml {
    /// Mark a string as trusted markup.
    pub fn new(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    /// Borrow the markup text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the markup is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Take the underlying string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for RawHtml {
    fn from(markup: String) -> Self {
        Self(markup)
    }
}

impl From<&str> for RawHtml {
    fn from(markup: &str) -> Self {
        Self(markup.to_string())
    }
}

impl fmt::Display for RawHtml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Escape HTML special characters in text and attribute values.
pub fn escape_html(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    let mut escaped = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Make serialized JSON safe to embed in a `<script>` body.
///
/// `<`, `>` and `&` become `\u003c`, `\u003e` and `\u0026`, so the payload
/// can neither close the element nor open a comment that swallows the real
/// closing tag. U+2028 and U+2029 are escaped as well since older
/// JavaScript engines treat them as line breaks. These characters only occur
/// inside JSON strings, so the result decodes to the same value.
pub fn escape_script_json(json: &str) -> String {
    if !json.contains(['<', '>', '&', '\u{2028}', '\u{2029}']) {
        return json.to_string();
    }

    let mut escaped = String::with_capacity(json.len() + 16);
    for c in json.chars() {
        match c {
            '<' => escaped.push_str("\\u003c"),
            '>' => escaped.push_str("\\u003e"),
            '&' => escaped.push_str("\\u0026"),
            '\u{2028}' => escaped.push_str("\\u2028"),
            '\u{2029}' => escaped.push_str("\\u2029"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_special_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#x27;Jerry&#x27;&lt;/a&gt;"
        );
    }

    #[test]
    fn borrows_when_nothing_to_escape() {
        assert!(matches!(escape_html("plain text"), Cow::Borrowed(_)));
    }

    #[test]
    fn breaks_closing_script_sequences() {
        let json = r#"{"html":"</script><script>alert(1)</script>"}"#;
        let escaped = escape_script_json(json);

        assert!(!escaped.contains('<'));
        assert!(!escaped.contains('>'));
        let round: serde_json::Value = serde_json::from_str(&escaped).unwrap();
        assert_eq!(round["html"], "</script><script>alert(1)</script>");
    }

    #[test]
    fn escapes_comment_openers_and_line_separators() {
        let value = serde_json::json!({"bio": "<!--<script> & \u{2028}\u{2029}"});
        let json = serde_json::to_string(&value).unwrap();

        let escaped = escape_script_json(&json);

        assert_eq!(
            escaped,
            r#"{"bio":"\u003c!--\u003cscript\u003e \u0026 \u2028\u2029"}"#
        );
        let round: serde_json::Value = serde_json::from_str(&escaped).unwrap();
        assert_eq!(round, value);
    }

    #[test]
    fn leaves_plain_json_untouched() {
        assert_eq!(escape_script_json(r#"{"count":1}"#), r#"{"count":1}"#);
    }

    #[test]
    fn raw_html_displays_verbatim() {
        let raw = RawHtml::new("<p>Hi & bye</p>");
        assert_eq!(raw.to_string(), "<p>Hi & bye</p>");
        assert!(!raw.is_empty());
    }
}

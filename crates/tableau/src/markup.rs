//! Markup helpers: content escaping and attribute serialization.
//!
//! Both functions are total and side-effect free. Every render path (direct
//! string building and template views) goes through them, which is what keeps
//! the two paths byte-for-byte equivalent.

use std::borrow::Cow;

use crate::html::Attributes;

/// Escapes `&`, `<`, `>` and `"` as HTML entities.
///
/// # Example
///
/// ```rust
/// use tableau::markup::escape;
///
/// assert_eq!(escape("Tom & \"Jerry\""), "Tom &amp; &quot;Jerry&quot;");
/// assert_eq!(escape("plain"), "plain");
/// ```
pub fn escape(text: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(text)
}

/// Serializes an attribute mapping to ` key="value"` pairs.
///
/// Keys are emitted in map order (sorted), each preceded by a single space,
/// so the result can be spliced straight into an opening tag. Values are
/// escaped; keys are written as-is. An empty mapping yields an empty string.
///
/// ```rust
/// use tableau::html::Attributes;
/// use tableau::markup::attributes;
///
/// let mut attrs = Attributes::new();
/// attrs.insert("class".into(), "name even".into());
/// attrs.insert("data-label".into(), "a<b".into());
/// assert_eq!(attributes(&attrs), r#" class="name even" data-label="a&lt;b""#);
/// ```
pub fn attributes(attrs: &Attributes) -> String {
    let mut out = String::new();
    for (key, value) in attrs {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape(value));
        out.push('"');
    }
    out
}

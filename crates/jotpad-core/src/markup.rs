//! Plain-text projection of rich note markup.
//!
//! Note content is an opaque markup blob. Search and list previews work on
//! the text a reader would see, so tags are dropped, block boundaries become
//! spaces and character references are decoded.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::util::truncate_with_ellipsis;

/// Default preview length for list snippets
pub const SNIPPET_CHARS: usize = 80;

static HIDDEN_ELEMENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<(script|style)\b[^>]*>.*?</(script|style)\s*>")
        .expect("valid hidden element regex")
});
static BLOCK_TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)</?\s*(br|div|p|li|ul|ol|h[1-6]|tr|td|blockquote|pre)\b[^>]*>")
        .expect("valid block tag regex")
});
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));
static NUMERIC_ENTITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)&#(x[0-9a-f]+|[0-9]+);").expect("valid entity regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Render markup as the plain text a reader would see.
#[must_use]
pub fn plain_text(markup: &str) -> String {
    let text = HIDDEN_ELEMENT_RE.replace_all(markup, "");
    let text = BLOCK_TAG_RE.replace_all(&text, " ");
    let text = TAG_RE.replace_all(&text, "");
    let text = decode_entities(&text);
    WHITESPACE_RE.replace_all(&text, " ").trim().to_string()
}

/// Plain-text preview of markup, cut to `max_chars` with a trailing `…`.
#[must_use]
pub fn snippet(markup: &str, max_chars: usize) -> String {
    truncate_with_ellipsis(&plain_text(markup), max_chars)
}

/// Escape text for safe inclusion in markup or an attribute value.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Markup fragment embedding an image (uploaded file or drawing) by data URL.
#[must_use]
pub fn image_fragment(data_url: &str) -> String {
    format!(r#"<img src="{}">"#, escape_html(data_url))
}

fn decode_entities(text: &str) -> String {
    let decoded = NUMERIC_ENTITY_RE.replace_all(text, |caps: &Captures<'_>| {
        let raw = &caps[1];
        let code = match raw.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => raw.parse::<u32>().ok(),
        };
        code.and_then(char::from_u32)
            .map_or_else(|| caps[0].to_string(), String::from)
    });

    decoded
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

//! Plain-text normalization of embedded markup.
//!
//! Structured-data answers frequently carry HTML; both extraction
//! strategies reduce answers to whitespace-normalized plain text before
//! validation.

use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Strip markup from an HTML fragment, returning trimmed plain text with
/// runs of whitespace collapsed to single spaces.
pub fn strip_markup(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let text = fragment
        .root_element()
        .text()
        .collect::<Vec<_>>()
        .join(" ");
    normalize_whitespace(&text)
}

/// Collapse whitespace runs and trim.
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_to_plain_text() {
        assert_eq!(strip_markup("<p>Hello <b>World</b></p>"), "Hello World");
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(strip_markup("Just text."), "Just text.");
    }

    #[test]
    fn collapses_whitespace_across_elements() {
        let html = "<div>\n  <p>First   line</p>\n  <p>Second line</p>\n</div>";
        assert_eq!(strip_markup(html), "First line Second line");
    }

    #[test]
    fn empty_markup_yields_empty_string() {
        assert_eq!(strip_markup("<p>   </p>"), "");
        assert_eq!(strip_markup(""), "");
    }

    #[test]
    fn normalize_whitespace_trims_and_collapses() {
        assert_eq!(normalize_whitespace("  a \t b \n c  "), "a b c");
    }
}

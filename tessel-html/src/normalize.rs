//! Whitespace handling for flattened text
//!
//! Newlines inside html are plain whitespace to a browser; only structural tags (and `pre`)
//! produce line breaks in the rendered page.
use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref REPEATED_SPACES: Regex = Regex::new(r" +").unwrap();
    static ref TRAILING_SPACES: Regex = Regex::new(r" +[\n\r]").unwrap();
    static ref REPEATED_NEWLINES: Regex = Regex::new(r"[\n\r]+").unwrap();
}

/// Replaces every run of newlines with a single space.
pub fn strip_newlines(fragment: &str) -> Cow<'_, str> {
    REPEATED_NEWLINES.replace_all(fragment, " ")
}

/// Collapses repeated spaces and newlines, drops spaces before a newline and trims the result.
///
/// Running it on its own output changes nothing.
pub fn strip_excessive_whitespace(document: &str) -> String {
    let document = REPEATED_SPACES.replace_all(document, " ");
    let document = TRAILING_SPACES.replace_all(&document, "\n");
    let document = REPEATED_NEWLINES.replace_all(&document, "\n");

    document.trim().to_string()
}

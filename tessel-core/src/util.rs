//! Utility functions for Tessel

/// Stable key for a source, used to index batch results.
///
/// A hyphenated UUID (v3) of the source bytes. The same source always maps to the same key.
///
/// # Example
///
/// ```
/// # use tessel_core::util::source_hash;
/// assert_eq!(
///     source_hash("https://example.com"),
///     source_hash("https://example.com")
/// );
/// assert_ne!(source_hash("https://a.example"), source_hash("https://b.example"));
/// ```
pub fn source_hash(source: impl AsRef<str>) -> String {
    uuid::Uuid::new_v3(&uuid::Uuid::NAMESPACE_OID, source.as_ref().as_bytes()).to_string()
}

/// Safely truncates a string to a maximum number of characters.
///
/// Respects utf8 character boundaries.
pub fn safe_truncate_utf8(s: impl AsRef<str>, max_chars: usize) -> String {
    s.as_ref().chars().take(max_chars).collect()
}

/// Debug print a long string by truncating to n characters
///
/// # Example
///
/// ```
/// # use tessel_core::util::debug_long_utf8;
/// let s = debug_long_utf8("🦀".repeat(10), 3);
///
/// assert_eq!(s, "🦀🦀🦀 (10)");
/// ```
pub fn debug_long_utf8(s: impl AsRef<str>, max_chars: usize) -> String {
    let trunc = safe_truncate_utf8(&s, max_chars);

    format!("{} ({})", trunc, s.as_ref().chars().count())
}

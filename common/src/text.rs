//! Text normalization for comparisons
//!
//! Decomposes to NFKD, drops combining marks (accents), lower-cases and trims.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonical comparison form of `text`. Idempotent.
pub fn normalize(text: &str) -> String {
    // second pass strips marks that case mapping can introduce (e.g. "İ")
    strip_marks(&strip_marks(text).to_lowercase())
        .trim()
        .to_string()
}

fn strip_marks(text: &str) -> String {
    text.nfkd().filter(|ch| !is_combining_mark(*ch)).collect()
}

/// `normalize` for optional input; absent becomes "".
pub fn normalize_opt(text: Option<&str>) -> String {
    text.map(normalize).unwrap_or_default()
}

/// Whitespace-delimited tokens of the normalized text
pub fn tokens(text: &str) -> std::collections::HashSet<String> {
    normalize(text)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

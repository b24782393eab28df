use std::sync::LazyLock;

use regex::Regex;

static NON_TEXT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9가-힣 ]").expect("cleaner pattern is valid"));

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Coarse ingestion-time clean.
///
/// Lowercases, replaces every character other than ASCII alphanumerics,
/// Hangul syllables and space with a space, collapses whitespace runs and
/// trims. Unlike [`super::normalize`] this keeps stopwords and word order
/// and returns a single string.
pub fn clean_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = NON_TEXT_RE.replace_all(&lowered, " ");
    WHITESPACE_RE.replace_all(&stripped, " ").trim().to_string()
}

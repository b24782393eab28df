use std::sync::LazyLock;

use regex::Regex;

// Lowercase ASCII alphanumerics or Hangul syllables (U+AC00..=U+D7A3).
static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-z0-9]+|[가-힣]+").expect("token pattern is valid"));

static HANGUL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[가-힣]+$").expect("hangul pattern is valid"));

/// Split text into lowercase alphanumeric and Hangul-syllable tokens.
///
/// The input is lowercased first, then maximal runs of `[a-z0-9]` or of
/// Hangul syllables are extracted left to right. Every other character
/// (whitespace, punctuation, other scripts) acts as a separator.
/// Absent or empty input yields no tokens.
pub fn tokenize<'a>(text: impl Into<Option<&'a str>>) -> Vec<String> {
    let Some(text) = text.into() else {
        return Vec::new();
    };
    if text.is_empty() {
        return Vec::new();
    }

    let lowered = text.to_lowercase();
    TOKEN_RE
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// True when the token consists only of Hangul syllables.
pub fn is_hangul(token: &str) -> bool {
    HANGUL_RE.is_match(token)
}

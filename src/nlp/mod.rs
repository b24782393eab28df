//! Text cleaning and tokenization.
//!
//! Two separate entry points with different contracts:
//! - [`clean_text`]: a lossy character filter applied once at ingestion.
//! - [`normalize`] / [`Normalizer`]: tokenizer plus stopword filter, used
//!   when building the preprocessed text table.

pub mod cleaner;
pub mod stopwords;
pub mod tokenizer;

use std::path::Path;

use crate::error::Result;

pub use cleaner::clean_text;
pub use stopwords::{StopwordFilter, DEFAULT_MIN_LEN};
pub use tokenizer::tokenize;

/// Tokenize then filter. Extension files are read on every call; stages that
/// normalize many texts should build a [`Normalizer`] once instead.
pub fn normalize<'a>(
    text: impl Into<Option<&'a str>>,
    extra_en_path: Option<&Path>,
    extra_ko_path: Option<&Path>,
    min_len: usize,
) -> Result<Vec<String>> {
    stopwords::filter(&tokenize(text), extra_en_path, extra_ko_path, min_len)
}

/// Reusable normalizer holding the effective stopword sets for one run.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    filter: StopwordFilter,
}

impl Normalizer {
    pub fn new(filter: StopwordFilter) -> Self {
        Self { filter }
    }

    pub fn load(
        extra_en_path: Option<&Path>,
        extra_ko_path: Option<&Path>,
        min_len: usize,
    ) -> Result<Self> {
        Ok(Self::new(StopwordFilter::load(
            extra_en_path,
            extra_ko_path,
            min_len,
        )?))
    }

    pub fn normalize<'a>(&self, text: impl Into<Option<&'a str>>) -> Vec<String> {
        self.filter.apply(&tokenize(text))
    }

    /// Normalized tokens joined by single spaces.
    pub fn clean(&self, text: &str) -> String {
        self.normalize(text).join(" ")
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn empty_and_absent_text_normalize_to_nothing() {
        assert!(normalize("", None, None, DEFAULT_MIN_LEN).unwrap().is_empty());
        assert!(normalize(None::<&str>, None, None, DEFAULT_MIN_LEN)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn normalizes_mixed_script_text() {
        let tokens = normalize(
            "국내 AI 스타트업, 머신러닝 신기술 공개",
            None,
            None,
            DEFAULT_MIN_LEN,
        )
        .unwrap();
        assert_eq!(tokens, vec!["국내", "ai", "스타트업", "머신러닝", "신기술", "공개"]);
    }

    #[test]
    fn drops_stopwords_and_short_tokens() {
        let tokens = normalize(
            "This is a test CONTENT with URLs like https://example.com and numbers 123.",
            None,
            None,
            DEFAULT_MIN_LEN,
        )
        .unwrap();
        assert_eq!(
            tokens,
            vec!["this", "test", "content", "urls", "like", "https", "example", "com", "numbers", "123"]
        );
    }

    #[test]
    fn normalizer_matches_free_function() {
        let mut ko = tempfile::NamedTempFile::new().unwrap();
        writeln!(ko, "성장하고").unwrap();

        let text = "인공지능 기술이 빠르게 성장하고 있다.";
        let expected = normalize(text, None, Some(ko.path()), 2).unwrap();
        let normalizer = Normalizer::load(None, Some(ko.path()), 2).unwrap();

        assert_eq!(normalizer.normalize(text), expected);
        assert_eq!(expected, vec!["인공지능", "기술이", "빠르게"]);
        assert_eq!(normalizer.clean(text), "인공지능 기술이 빠르게");
    }

    #[test]
    fn clean_of_stopword_only_text_is_empty() {
        assert_eq!(Normalizer::default().clean("the and of 그리고"), "");
    }
}

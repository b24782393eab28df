use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

use crate::error::Result;

use super::tokenizer::is_hangul;

pub const DEFAULT_MIN_LEN: usize = 2;

const EN_STOPWORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "if", "then", "else", "when", "while", "of", "at", "by",
    "for", "with", "about", "against", "between", "into", "through", "during", "before", "after",
    "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over", "under",
    "again", "further", "once", "here", "there", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "can", "will", "just", "don", "should", "now", "is", "am", "are", "was", "were",
];

const KO_STOPWORDS: &[&str] = &[
    "이", "그", "저", "것", "수", "등", "들", "및", "에서", "으로", "에게", "으로써", "부터", "까지",
    "와", "과", "도", "만", "은", "는", "이랑", "랑", "으로서", "대한", "관련", "합니다", "한다",
    "했다", "하며", "하고", "이다", "있다", "없다", "위해", "또한", "그러나", "하지만", "그리고",
];

static BUILTIN_EN: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| EN_STOPWORDS.iter().copied().collect());

static BUILTIN_KO: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| KO_STOPWORDS.iter().copied().collect());

/// Read a newline-delimited stopword file.
///
/// A missing path or a path that does not exist contributes nothing.
/// Lines are trimmed and blank lines skipped.
pub fn load_extra_stopwords(path: Option<&Path>) -> Result<HashSet<String>> {
    let Some(path) = path else {
        return Ok(HashSet::new());
    };
    if !path.exists() {
        tracing::debug!("Stopword file {} not found, skipping", path.display());
        return Ok(HashSet::new());
    }

    let content = std::fs::read_to_string(path)?;
    let words: HashSet<String> = content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect();

    tracing::debug!("Loaded {} extra stopwords from {}", words.len(), path.display());
    Ok(words)
}

/// Stopword and length filter over tokens produced by the tokenizer.
///
/// The built-in sets are shared constants; user extensions live on the
/// instance and never touch them.
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    extra_en: HashSet<String>,
    extra_ko: HashSet<String>,
    min_len: usize,
}

impl StopwordFilter {
    pub fn new(min_len: usize) -> Self {
        Self {
            extra_en: HashSet::new(),
            extra_ko: HashSet::new(),
            min_len,
        }
    }

    pub fn load(
        extra_en_path: Option<&Path>,
        extra_ko_path: Option<&Path>,
        min_len: usize,
    ) -> Result<Self> {
        Ok(Self {
            extra_en: load_extra_stopwords(extra_en_path)?,
            extra_ko: load_extra_stopwords(extra_ko_path)?,
            min_len,
        })
    }

    pub fn is_stopword(&self, token: &str) -> bool {
        if is_hangul(token) {
            BUILTIN_KO.contains(token) || self.extra_ko.contains(token)
        } else {
            BUILTIN_EN.contains(token) || self.extra_en.contains(token)
        }
    }

    /// Keep tokens that are long enough and not stopwords, in input order.
    pub fn apply<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<String> {
        tokens
            .iter()
            .filter_map(|t| {
                let t: &str = t.as_ref();
                if t.chars().count() < self.min_len || self.is_stopword(t) {
                    None
                } else {
                    Some(t.to_string())
                }
            })
            .collect()
    }
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_LEN)
    }
}

/// One-shot filter: loads the extension files for this call only.
pub fn filter<S: AsRef<str>>(
    tokens: &[S],
    extra_en_path: Option<&Path>,
    extra_ko_path: Option<&Path>,
    min_len: usize,
) -> Result<Vec<String>> {
    let filter = StopwordFilter::load(extra_en_path, extra_ko_path, min_len)?;
    Ok(filter.apply(tokens))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::error::AppError;

    #[test]
    fn min_length_filter() {
        let out = filter(&["a", "ai", "인", "인공"], None, None, 2).unwrap();
        assert_eq!(out, vec!["ai", "인공"]);
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // "인" is three bytes but a single character.
        let out = filter(&["인"], None, None, 2).unwrap();
        assert!(out.is_empty());
        let out = filter(&["인공지능"], None, None, 4).unwrap();
        assert_eq!(out, vec!["인공지능"]);
    }

    #[test]
    fn drops_builtin_stopwords_per_script() {
        let tokens = ["the", "model", "에서", "모델", "and", "그리고", "2025"];
        let out = StopwordFilter::default().apply(&tokens);
        assert_eq!(out, vec!["model", "모델", "2025"]);
    }

    #[test]
    fn hangul_stopword_does_not_apply_to_latin_tokens() {
        let f = StopwordFilter::default();
        assert!(f.is_stopword("에서"));
        assert!(!f.is_stopword("ai"));
        assert!(f.is_stopword("the"));
    }

    #[test]
    fn preserves_order_and_duplicates() {
        let out = StopwordFilter::default().apply(&["model", "data", "model"]);
        assert_eq!(out, vec!["model", "data", "model"]);
    }

    #[test]
    fn missing_file_contributes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.txt");
        let words = load_extra_stopwords(Some(&missing)).unwrap();
        assert!(words.is_empty());
        assert!(load_extra_stopwords(None).unwrap().is_empty());
    }

    #[test]
    fn unreadable_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_extra_stopwords(Some(dir.path())).unwrap_err();
        assert!(matches!(err, AppError::Io(_)));

        let mut bad = NamedTempFile::new().unwrap();
        bad.write_all(&[0xff, 0xfe, b'\n']).unwrap();
        let err = StopwordFilter::load(None, Some(bad.path()), 2).unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }

    #[test]
    fn extra_files_extend_the_matching_set() {
        let mut en = NamedTempFile::new().unwrap();
        writeln!(en, "  model  \n\n launches\n   ").unwrap();
        let mut ko = NamedTempFile::new().unwrap();
        writeln!(ko, "기술이\n").unwrap();

        let tokens = ["openai", "launches", "model", "기술이", "성장"];
        let out = filter(&tokens, Some(en.path()), Some(ko.path()), 2).unwrap();
        assert_eq!(out, vec!["openai", "성장"]);
    }

    #[test]
    fn extensions_do_not_leak_between_filters() {
        let mut en = NamedTempFile::new().unwrap();
        writeln!(en, "model").unwrap();

        let extended = StopwordFilter::load(Some(en.path()), None, 2).unwrap();
        assert!(extended.is_stopword("model"));
        assert!(!StopwordFilter::default().is_stopword("model"));
    }

    #[test]
    fn extra_latin_words_do_not_filter_hangul_tokens() {
        let mut en = NamedTempFile::new().unwrap();
        writeln!(en, "모델").unwrap();
        let f = StopwordFilter::load(Some(en.path()), None, 2).unwrap();
        assert_eq!(f.apply(&["모델"]), vec!["모델"]);
    }
}

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;
use crate::models::PreprocessedArticle;

pub const TOKENS_ARTIFACT: &str = "news_tokens.json";

#[derive(Debug, Serialize)]
struct TokenRow<'a> {
    news_id: i64,
    title_tokens: Vec<&'a str>,
    content_tokens: Vec<&'a str>,
    title_clean: &'a str,
    content_clean: &'a str,
}

fn split_tokens(clean: &str) -> Vec<&str> {
    clean.split(' ').filter(|t| !t.is_empty()).collect()
}

pub fn write_tokens(data_dir: &Path, rows: &[PreprocessedArticle]) -> Result<PathBuf> {
    let export: Vec<TokenRow<'_>> = rows
        .iter()
        .map(|r| TokenRow {
            news_id: r.news_id,
            title_tokens: split_tokens(&r.title_clean),
            content_tokens: split_tokens(&r.content_clean),
            title_clean: &r.title_clean,
            content_clean: &r.content_clean,
        })
        .collect();

    std::fs::create_dir_all(data_dir)?;
    let path = data_dir.join(TOKENS_ARTIFACT);
    std::fs::write(&path, serde_json::to_string_pretty(&export)?)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn writes_token_lists_next_to_clean_text() {
        let tmp = tempfile::tempdir().unwrap();
        let rows = vec![PreprocessedArticle {
            news_id: 7,
            title_clean: "openai launches".to_string(),
            content_clean: String::new(),
            updated_at: Utc::now(),
        }];

        let path = write_tokens(tmp.path(), &rows).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();

        assert_eq!(value[0]["news_id"], 7);
        assert_eq!(value[0]["title_tokens"], serde_json::json!(["openai", "launches"]));
        assert_eq!(value[0]["content_tokens"], serde_json::json!([]));
        assert_eq!(value[0]["title_clean"], "openai launches");
    }
}

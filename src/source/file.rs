use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::models::RawArticle;

#[derive(Deserialize)]
#[serde(untagged)]
enum BatchFile {
    Envelope { articles: Vec<RawArticle> },
    Bare(Vec<RawArticle>),
}

/// Read a batch of upstream records from a JSON file, either a bare array
/// or the news API's `{"articles": [...]}` envelope.
pub fn load_batch_file(path: &Path) -> Result<Vec<RawArticle>> {
    let content = std::fs::read_to_string(path)?;
    let batch: BatchFile = serde_json::from_str(&content)?;
    let articles = match batch {
        BatchFile::Envelope { articles } => articles,
        BatchFile::Bare(articles) => articles,
    };
    tracing::debug!("Loaded {} records from {}", articles.len(), path.display());
    Ok(articles)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn reads_bare_array() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("batch.json");
        std::fs::write(
            &path,
            r#"[{"title": "A", "content": "B", "publishedAt": "2025-01-01T00:00:00Z"}, {"title": "C"}]"#,
        )
        .unwrap();

        let batch = load_batch_file(&path).unwrap();
        assert_eq!(batch.len(), 2);
        assert!(batch[1].content.is_none());
    }

    #[test]
    fn reads_api_envelope() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("batch.json");
        std::fs::write(
            &path,
            r#"{"status": "ok", "articles": [{"title": "A", "content": "B", "publishedAt": null}]}"#,
        )
        .unwrap();

        let batch = load_batch_file(&path).unwrap();
        assert_eq!(batch.len(), 1);
        assert!(batch[0].published_at.is_none());
    }

    #[test]
    fn missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        assert!(load_batch_file(&tmp.path().join("missing.json")).is_err());
    }
}

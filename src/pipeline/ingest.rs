use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDateTime};

use crate::error::{AppError, Result};
use crate::models::{NewArticle, RawArticle};
use crate::nlp::clean_text;

pub const BATCH_ARTIFACT: &str = "preprocessed_news.json";

/// Drop incomplete records and apply the coarse ingestion clean.
///
/// Records missing a title, content or publish time are dropped, as are
/// records whose publish time is not RFC 3339. Fails when the input is
/// empty or nothing survives.
pub fn prepare_batch(batch: Vec<RawArticle>) -> Result<Vec<NewArticle>> {
    if batch.is_empty() {
        return Err(AppError::EmptyBatch(
            "no articles fetched for preprocessing".to_string(),
        ));
    }

    let received = batch.len();
    let prepared: Vec<NewArticle> = batch.into_iter().filter_map(prepare_one).collect();

    if prepared.is_empty() {
        return Err(AppError::EmptyBatch(format!(
            "all {} fetched articles were incomplete",
            received
        )));
    }
    Ok(prepared)
}

fn prepare_one(raw: RawArticle) -> Option<NewArticle> {
    let (Some(title), Some(content), Some(published)) =
        (raw.title, raw.content, raw.published_at)
    else {
        tracing::debug!("Dropping incomplete article record");
        return None;
    };

    let Some(published_at) = parse_published_at(&published) else {
        tracing::debug!("Dropping article with bad publishedAt {:?}", published);
        return None;
    };

    Some(NewArticle {
        title: clean_text(&title),
        content: clean_text(&content),
        published_at: Some(published_at),
    })
}

/// Parse an upstream timestamp, keeping the local time as written.
///
/// An offset such as `-05:00` is dropped rather than converted, so the
/// calendar date is the one the source published under.
pub fn parse_published_at(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    // Offset-less timestamps (e.g., "2025-01-01T10:00:00")
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").ok()
}

/// Write the cleaned batch to the data directory.
pub fn write_batch_artifact(data_dir: &Path, articles: &[NewArticle]) -> Result<PathBuf> {
    std::fs::create_dir_all(data_dir)?;
    let path = data_dir.join(BATCH_ARTIFACT);
    let json = serde_json::to_string_pretty(articles)?;
    std::fs::write(&path, json)?;
    Ok(path)
}

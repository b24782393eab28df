use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A record as delivered by the upstream news source. Every field may be missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawArticle {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, rename = "publishedAt")]
    pub published_at: Option<String>,
}

/// A stored article. `title` is unique across the table.
///
/// `published_at` is the wall-clock time as the source wrote it; any UTC
/// offset is discarded, not applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub published_at: Option<NaiveDateTime>,
}

/// An article that passed ingestion-time cleaning and is ready for insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewArticle {
    pub title: String,
    pub content: String,
    pub published_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreprocessedArticle {
    pub news_id: i64,
    pub title_clean: String,
    pub content_clean: String,
    pub updated_at: DateTime<Utc>,
}

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Row};
use tokio_rusqlite::Connection;

use crate::error::Result;
use crate::models::{Article, DailyStat, NewArticle, PreprocessedArticle};

use super::schema::SCHEMA;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct Repository {
    conn: Connection,
}

impl Repository {
    pub async fn new(db_path: &str) -> Result<Self> {
        let conn = Connection::open(db_path).await?;

        conn.call(|conn| {
            conn.execute_batch(SCHEMA)?;
            Ok(())
        })
        .await?;

        Ok(Self { conn })
    }

    // News operations

    /// Insert unless an article with the same title exists.
    /// Returns `false` when the title was already taken.
    pub async fn insert_article_if_new(&self, article: NewArticle) -> Result<bool> {
        let inserted = self
            .conn
            .call(move |conn| {
                let changed = conn.execute(
                    r#"INSERT INTO news (title, content, published_at)
                       VALUES (?1, ?2, ?3)
                       ON CONFLICT(title) DO NOTHING"#,
                    params![
                        article.title,
                        article.content,
                        article.published_at.map(|dt| dt.format(TIMESTAMP_FORMAT).to_string()),
                    ],
                )?;
                Ok(changed > 0)
            })
            .await?;
        Ok(inserted)
    }

    pub async fn get_all_articles(&self) -> Result<Vec<Article>> {
        let articles = self
            .conn
            .call(|conn| {
                let mut stmt =
                    conn.prepare("SELECT id, title, content, published_at FROM news ORDER BY id")?;
                let articles = stmt
                    .query_map([], article_from_row)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(articles)
            })
            .await?;
        Ok(articles)
    }

    pub async fn article_count(&self) -> Result<i64> {
        let count = self
            .conn
            .call(|conn| {
                let count: i64 = conn.query_row("SELECT COUNT(*) FROM news", [], |row| row.get(0))?;
                Ok(count)
            })
            .await?;
        Ok(count)
    }

    // Preprocessed text operations

    pub async fn upsert_preprocessed(
        &self,
        news_id: i64,
        title_clean: String,
        content_clean: String,
    ) -> Result<()> {
        self.conn
            .call(move |conn| {
                conn.execute(
                    r#"INSERT INTO news_preprocessed (news_id, title_clean, content_clean, updated_at)
                       VALUES (?1, ?2, ?3, datetime('now'))
                       ON CONFLICT(news_id) DO UPDATE SET
                           title_clean = excluded.title_clean,
                           content_clean = excluded.content_clean,
                           updated_at = datetime('now')"#,
                    params![news_id, title_clean, content_clean],
                )?;
                Ok(())
            })
            .await?;
        Ok(())
    }

    pub async fn get_preprocessed(&self, news_id: i64) -> Result<Option<PreprocessedArticle>> {
        let row = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT news_id, title_clean, content_clean, updated_at FROM news_preprocessed WHERE news_id = ?1",
                )?;
                let row = stmt
                    .query_row(params![news_id], preprocessed_from_row)
                    .optional()?;
                Ok(row)
            })
            .await?;
        Ok(row)
    }

    pub async fn get_all_preprocessed(&self) -> Result<Vec<PreprocessedArticle>> {
        let rows = self
            .conn
            .call(|conn| {
                let mut stmt = conn.prepare(
                    "SELECT news_id, title_clean, content_clean, updated_at FROM news_preprocessed ORDER BY news_id",
                )?;
                let rows = stmt
                    .query_map([], preprocessed_from_row)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(rows)
            })
            .await?;
        Ok(rows)
    }

    // Daily stats operations

    pub async fn upsert_daily_stat(&self, stat: DailyStat) -> Result<()> {
        self.conn
            .call(move |conn| {
                conn.execute(
                    r#"INSERT INTO news_daily_stats
                           (stat_date, article_count, ai_count, ml_count, ko_ai_count, updated_at)
                       VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                       ON CONFLICT(stat_date) DO UPDATE SET
                           article_count = excluded.article_count,
                           ai_count = excluded.ai_count,
                           ml_count = excluded.ml_count,
                           ko_ai_count = excluded.ko_ai_count,
                           updated_at = excluded.updated_at"#,
                    params![
                        stat.stat_date.format(DATE_FORMAT).to_string(),
                        stat.article_count,
                        stat.ai_count,
                        stat.ml_count,
                        stat.ko_ai_count,
                        stat.updated_at.to_rfc3339(),
                    ],
                )?;
                Ok(())
            })
            .await?;
        Ok(())
    }

    pub async fn get_daily_stat(&self, date: NaiveDate) -> Result<Option<DailyStat>> {
        let key = date.format(DATE_FORMAT).to_string();
        let stat = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    r#"SELECT stat_date, article_count, ai_count, ml_count, ko_ai_count, updated_at
                       FROM news_daily_stats WHERE stat_date = ?1"#,
                )?;
                let stat = stmt
                    .query_row(params![key], daily_stat_from_row)
                    .optional()?;
                Ok(stat)
            })
            .await?;
        Ok(stat)
    }

    pub async fn get_daily_stats(&self) -> Result<Vec<DailyStat>> {
        let stats = self
            .conn
            .call(|conn| {
                let mut stmt = conn.prepare(
                    r#"SELECT stat_date, article_count, ai_count, ml_count, ko_ai_count, updated_at
                       FROM news_daily_stats ORDER BY stat_date"#,
                )?;
                let stats = stmt
                    .query_map([], daily_stat_from_row)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(stats)
            })
            .await?;
        Ok(stats)
    }
}

fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    // Try RFC3339 first (e.g., "2026-01-11T12:34:56+00:00")
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    // Try SQLite datetime format (e.g., "2026-01-11 12:34:56")
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT) {
        return Some(naive.and_utc());
    }
    None
}

fn article_from_row(row: &Row) -> rusqlite::Result<Article> {
    Ok(Article {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        published_at: row
            .get::<_, Option<String>>(3)?
            .and_then(|s| NaiveDateTime::parse_from_str(&s, TIMESTAMP_FORMAT).ok()),
    })
}

fn preprocessed_from_row(row: &Row) -> rusqlite::Result<PreprocessedArticle> {
    Ok(PreprocessedArticle {
        news_id: row.get(0)?,
        title_clean: row.get(1)?,
        content_clean: row.get(2)?,
        updated_at: row
            .get::<_, String>(3)
            .ok()
            .and_then(|s| parse_datetime(&s))
            .unwrap_or_else(Utc::now),
    })
}

fn daily_stat_from_row(row: &Row) -> rusqlite::Result<DailyStat> {
    let raw_date: String = row.get(0)?;
    let stat_date = NaiveDate::parse_from_str(&raw_date, DATE_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))?;

    Ok(DailyStat {
        stat_date,
        article_count: row.get(1)?,
        ai_count: row.get(2)?,
        ml_count: row.get(3)?,
        ko_ai_count: row.get(4)?,
        updated_at: row
            .get::<_, String>(5)
            .ok()
            .and_then(|s| parse_datetime(&s))
            .unwrap_or_else(Utc::now),
    })
}

#[cfg(test)]
mod tests {
    use tokio_test::assert_ok;

    use super::*;

    fn published() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    fn article(title: &str, content: &str) -> NewArticle {
        NewArticle {
            title: title.to_string(),
            content: content.to_string(),
            published_at: Some(published()),
        }
    }

    #[tokio::test]
    async fn duplicate_title_is_skipped_first_write_wins() {
        let repo = Repository::new(":memory:").await.unwrap();

        assert!(repo.insert_article_if_new(article("ai wins", "first")).await.unwrap());
        assert!(!repo.insert_article_if_new(article("ai wins", "second")).await.unwrap());

        let articles = repo.get_all_articles().await.unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].content, "first");
        assert_eq!(articles[0].published_at, Some(published()));
    }

    #[tokio::test]
    async fn null_published_at_round_trips() {
        let repo = Repository::new(":memory:").await.unwrap();
        let mut a = article("undated", "body");
        a.published_at = None;
        assert_ok!(repo.insert_article_if_new(a).await);

        let articles = repo.get_all_articles().await.unwrap();
        assert_eq!(articles[0].published_at, None);
        assert_eq!(repo.article_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn preprocessed_upsert_overwrites() {
        let repo = Repository::new(":memory:").await.unwrap();
        repo.insert_article_if_new(article("t", "c")).await.unwrap();
        let id = repo.get_all_articles().await.unwrap()[0].id;

        repo.upsert_preprocessed(id, "old".into(), "old body".into())
            .await
            .unwrap();
        repo.upsert_preprocessed(id, "new".into(), "new body".into())
            .await
            .unwrap();

        let all = repo.get_all_preprocessed().await.unwrap();
        assert_eq!(all.len(), 1);
        let row = repo.get_preprocessed(id).await.unwrap().unwrap();
        assert_eq!(row.title_clean, "new");
        assert_eq!(row.content_clean, "new body");
        assert!(repo.get_preprocessed(id + 100).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn daily_stat_upsert_overwrites_all_counts() {
        let repo = Repository::new(":memory:").await.unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let mut stat = DailyStat {
            stat_date: date,
            article_count: 5,
            ai_count: 4,
            ml_count: 3,
            ko_ai_count: 2,
            updated_at: Utc::now(),
        };
        repo.upsert_daily_stat(stat.clone()).await.unwrap();

        stat.article_count = 1;
        stat.ai_count = 0;
        stat.ml_count = 0;
        stat.ko_ai_count = 1;
        repo.upsert_daily_stat(stat).await.unwrap();

        let stats = repo.get_daily_stats().await.unwrap();
        assert_eq!(stats.len(), 1);
        let row = repo.get_daily_stat(date).await.unwrap().unwrap();
        assert_eq!(
            (row.article_count, row.ai_count, row.ml_count, row.ko_ai_count),
            (1, 0, 0, 1)
        );
    }

    #[tokio::test]
    async fn file_backed_database_persists_between_connections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("news.db");
        let path = path.to_string_lossy().to_string();

        {
            let repo = Repository::new(&path).await.unwrap();
            repo.insert_article_if_new(article("kept", "body")).await.unwrap();
        }

        let repo = Repository::new(&path).await.unwrap();
        assert_eq!(repo.article_count().await.unwrap(), 1);
        assert!(!repo.insert_article_if_new(article("kept", "again")).await.unwrap());
    }

    #[test]
    fn parses_both_timestamp_formats() {
        assert!(parse_datetime("2026-01-11T12:34:56+00:00").is_some());
        assert!(parse_datetime("2026-01-11 12:34:56").is_some());
        assert!(parse_datetime("yesterday").is_none());
    }
}

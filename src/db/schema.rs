pub const SCHEMA: &str = r#"
-- news table (titles are stored cleaned, duplicates are skipped)
CREATE TABLE IF NOT EXISTS news (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL UNIQUE,
    content TEXT NOT NULL,
    published_at TEXT
);

CREATE INDEX IF NOT EXISTS idx_news_published_at ON news(published_at);

-- news_preprocessed table (one row per news id, overwritten on every run)
CREATE TABLE IF NOT EXISTS news_preprocessed (
    news_id INTEGER PRIMARY KEY REFERENCES news(id) ON DELETE CASCADE,
    title_clean TEXT NOT NULL,
    content_clean TEXT NOT NULL,
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- news_daily_stats table (fully recomputed per date)
CREATE TABLE IF NOT EXISTS news_daily_stats (
    stat_date TEXT PRIMARY KEY,
    article_count INTEGER NOT NULL,
    ai_count INTEGER NOT NULL,
    ml_count INTEGER NOT NULL,
    ko_ai_count INTEGER NOT NULL,
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;

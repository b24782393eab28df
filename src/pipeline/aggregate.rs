use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{Article, DailyStat};

const AI_KEYWORD: &str = "ai";
const ML_KEYWORD: &str = "머신러닝";
const KO_AI_KEYWORD: &str = "인공지능";

#[derive(Debug, Default, Clone, Copy)]
struct DayCounts {
    articles: i64,
    ai: i64,
    ml: i64,
    ko_ai: i64,
}

fn mentions(article: &Article, keyword: &str) -> bool {
    article.title.contains(keyword) || article.content.contains(keyword)
}

fn mentions_ignore_case(article: &Article, keyword: &str) -> bool {
    article.title.to_lowercase().contains(keyword)
        || article.content.to_lowercase().contains(keyword)
}

/// Group dated articles by calendar day and count keyword mentions.
///
/// Counting is substring containment on the stored text. Articles without a
/// publish time are skipped, so only days with at least one article appear.
/// Rows come out sorted by date and all carry `now` as `updated_at`.
pub fn compute_daily_stats(articles: &[Article], now: DateTime<Utc>) -> Vec<DailyStat> {
    let mut days: BTreeMap<NaiveDate, DayCounts> = BTreeMap::new();

    for article in articles {
        let Some(published_at) = article.published_at else {
            continue;
        };
        let day = days.entry(published_at.date()).or_default();
        day.articles += 1;
        day.ai += i64::from(mentions_ignore_case(article, AI_KEYWORD));
        day.ml += i64::from(mentions(article, ML_KEYWORD));
        day.ko_ai += i64::from(mentions(article, KO_AI_KEYWORD));
    }

    days.into_iter()
        .map(|(stat_date, c)| DailyStat {
            stat_date,
            article_count: c.articles,
            ai_count: c.ai,
            ml_count: c.ml,
            ko_ai_count: c.ko_ai,
            updated_at: now,
        })
        .collect()
}

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Per-day aggregate, always recomputed from the full article table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyStat {
    pub stat_date: NaiveDate,
    pub article_count: i64,
    pub ai_count: i64,
    pub ml_count: i64,
    pub ko_ai_count: i64,
    pub updated_at: DateTime<Utc>,
}

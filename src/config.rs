use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};
use crate::nlp::DEFAULT_MIN_LEN;

pub const DEFAULT_QUERY: &str = "AI OR 인공지능 OR 머신러닝";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_db_path")]
    pub db_path: String,

    /// Directory for on-disk intermediate artifacts.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    pub news_api_key: Option<String>,

    #[serde(default = "default_query")]
    pub query: String,

    #[serde(default = "default_page_size")]
    pub page_size: u32,

    #[serde(default = "default_schedule_interval")]
    pub schedule_interval_minutes: u32,

    pub extra_en_stopwords: Option<PathBuf>,
    pub extra_ko_stopwords: Option<PathBuf>,

    #[serde(default = "default_min_token_len")]
    pub min_token_len: usize,
}

fn default_db_path() -> String {
    let data_dir = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("news-pipeline");
    std::fs::create_dir_all(&data_dir).ok();
    data_dir.join("news.db").to_string_lossy().to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("/tmp")
}

fn default_query() -> String {
    DEFAULT_QUERY.to_string()
}

fn default_page_size() -> u32 {
    50
}

fn default_schedule_interval() -> u32 {
    10
}

fn default_min_token_len() -> usize {
    DEFAULT_MIN_LEN
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            data_dir: default_data_dir(),
            news_api_key: None,
            query: default_query(),
            page_size: default_page_size(),
            schedule_interval_minutes: default_schedule_interval(),
            extra_en_stopwords: None,
            extra_ko_stopwords: None,
            min_token_len: default_min_token_len(),
        }
    }
}

impl Config {
    /// Load the config file (creating it with defaults on first run), then
    /// apply `.env` and process environment overrides.
    pub fn load() -> Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!("No .env file loaded: {}", e);
        }

        let mut config = Self::load_from(&Self::config_path())?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| AppError::Config(e.to_string()))?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("news-pipeline")
            .join("config.toml")
    }

    /// Environment-style overrides. Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("DB_PATH") {
            self.db_path = v;
        }
        if let Some(v) = get("DATA_DIR") {
            self.data_dir = PathBuf::from(v);
        }
        if let Some(v) = get("NEWS_API_KEY") {
            self.news_api_key = Some(v);
        }
        if let Some(v) = get("NEWS_QUERY") {
            self.query = v;
        }
        if let Some(v) = get("NEWS_PAGE_SIZE") {
            self.page_size = parse_number("NEWS_PAGE_SIZE", &v)?;
        }
        if let Some(v) = get("SCHEDULE_INTERVAL_MINUTES") {
            self.schedule_interval_minutes = parse_number("SCHEDULE_INTERVAL_MINUTES", &v)?;
        }
        if let Some(v) = get("EXTRA_EN_STOPWORDS") {
            self.extra_en_stopwords = Some(PathBuf::from(v));
        }
        if let Some(v) = get("EXTRA_KO_STOPWORDS") {
            self.extra_ko_stopwords = Some(PathBuf::from(v));
        }
        if let Some(v) = get("MIN_TOKEN_LEN") {
            self.min_token_len = parse_number("MIN_TOKEN_LEN", &v)?;
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::Config(format!("{} must be a number, got {:?}", key, value)))
}

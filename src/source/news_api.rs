use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::RawArticle;

const NEWS_API_URL: &str = "https://newsapi.org/v2/everything";

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    articles: Vec<RawArticle>,
}

pub struct NewsApiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl NewsApiClient {
    pub fn new(api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("news-pipeline/0.1")
            .build()?;

        Ok(Self {
            client,
            api_key,
            base_url: NEWS_API_URL.to_string(),
        })
    }

    pub fn from_key(api_key: Option<&str>) -> Result<Self> {
        match api_key {
            Some(key) if !key.trim().is_empty() => Self::new(key.to_string()),
            _ => Err(AppError::Config(
                "news_api_key is not set (config file or NEWS_API_KEY)".to_string(),
            )),
        }
    }

    pub fn request_url(&self, query: &str, page_size: u32) -> Result<Url> {
        let page_size = page_size.to_string();
        let url = Url::parse_with_params(
            &self.base_url,
            [
                ("q", query),
                ("pageSize", page_size.as_str()),
                ("apiKey", self.api_key.as_str()),
            ],
        )
        .map_err(|e| anyhow::anyhow!("Invalid news API url {}: {}", self.base_url, e))?;
        Ok(url)
    }

    /// Fetch one page of articles matching `query`.
    pub async fn fetch(&self, query: &str, page_size: u32) -> Result<Vec<RawArticle>> {
        let url = self.request_url(query, page_size)?;
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(AppError::NewsApi(format!("HTTP {}: {}", status, error_text)));
        }

        let body: EverythingResponse = response.json().await?;
        if body.status.as_deref() == Some("error") {
            return Err(AppError::NewsApi(
                body.message.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }

        tracing::debug!("Fetched {} articles for query {:?}", body.articles.len(), query);
        Ok(body.articles)
    }
}

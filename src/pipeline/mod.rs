//! Pipeline stages: ingest, preprocess, aggregate and token export.
//!
//! Each stage is a batch job that drains its input before returning. Every
//! insert or upsert is its own statement, so a failure halfway through a
//! stage leaves the rows already written in place.

mod aggregate;
mod export;
mod ingest;

use std::path::PathBuf;

use chrono::Utc;

use crate::config::Config;
use crate::db::Repository;
use crate::error::Result;
use crate::models::{AggregateReport, IngestReport, PreprocessReport, RawArticle};
use crate::nlp::Normalizer;

pub use aggregate::compute_daily_stats;
pub use export::TOKENS_ARTIFACT;
pub use ingest::{prepare_batch, BATCH_ARTIFACT};

/// Stopword settings; extension files are re-read on every preprocessing run.
#[derive(Debug, Clone, Default)]
pub struct StopwordSettings {
    pub extra_en: Option<PathBuf>,
    pub extra_ko: Option<PathBuf>,
    pub min_len: usize,
}

pub struct Pipeline {
    pub repository: Repository,
    data_dir: PathBuf,
    stopwords: StopwordSettings,
}

impl Pipeline {
    pub async fn new(config: &Config) -> Result<Self> {
        let repository = Repository::new(&config.db_path).await?;
        let stopwords = StopwordSettings {
            extra_en: config.extra_en_stopwords.clone(),
            extra_ko: config.extra_ko_stopwords.clone(),
            min_len: config.min_token_len,
        };
        Ok(Self::with_repository(
            repository,
            config.data_dir.clone(),
            stopwords,
        ))
    }

    pub fn with_repository(
        repository: Repository,
        data_dir: PathBuf,
        stopwords: StopwordSettings,
    ) -> Self {
        Self {
            repository,
            data_dir,
            stopwords,
        }
    }

    /// Clean the batch, write it to the data directory, then insert each
    /// article unless its title is already stored.
    pub async fn ingest(&self, batch: Vec<RawArticle>) -> Result<IngestReport> {
        let received = batch.len();
        let articles = prepare_batch(batch)?;

        let artifact = ingest::write_batch_artifact(&self.data_dir, &articles)?;
        tracing::debug!("Wrote cleaned batch to {}", artifact.display());

        let mut report = IngestReport {
            received,
            dropped: received - articles.len(),
            ..Default::default()
        };

        for article in articles {
            let title = article.title.clone();
            if self.repository.insert_article_if_new(article).await? {
                report.inserted += 1;
            } else {
                tracing::debug!("Skipping duplicate title {:?}", title);
                report.duplicates += 1;
            }
        }

        tracing::info!(
            received = report.received,
            dropped = report.dropped,
            inserted = report.inserted,
            duplicates = report.duplicates,
            "Ingested news batch"
        );
        Ok(report)
    }

    /// Normalize every stored article and overwrite its preprocessed row.
    pub async fn preprocess_all(&self) -> Result<PreprocessReport> {
        let normalizer = Normalizer::load(
            self.stopwords.extra_en.as_deref(),
            self.stopwords.extra_ko.as_deref(),
            self.stopwords.min_len,
        )?;

        let articles = self.repository.get_all_articles().await?;
        if articles.is_empty() {
            tracing::warn!("No stored articles to preprocess");
            return Ok(PreprocessReport::default());
        }

        let mut report = PreprocessReport::default();
        for article in articles {
            let title_clean = normalizer.clean(&article.title);
            let content_clean = normalizer.clean(&article.content);
            self.repository
                .upsert_preprocessed(article.id, title_clean, content_clean)
                .await?;
            report.processed += 1;
        }

        tracing::info!(processed = report.processed, "Preprocessed stored articles");
        Ok(report)
    }

    /// Recompute every daily row from the current article table.
    pub async fn recompute_daily_stats(&self) -> Result<AggregateReport> {
        let articles = self.repository.get_all_articles().await?;
        let stats = compute_daily_stats(&articles, Utc::now());

        let report = AggregateReport { days: stats.len() };
        for stat in stats {
            self.repository.upsert_daily_stat(stat).await?;
        }

        tracing::info!(days = report.days, "Recomputed daily stats");
        Ok(report)
    }

    pub async fn export_tokens(&self) -> Result<PathBuf> {
        let rows = self.repository.get_all_preprocessed().await?;
        let path = export::write_tokens(&self.data_dir, &rows)?;
        tracing::info!(rows = rows.len(), "Exported tokens to {}", path.display());
        Ok(path)
    }

    /// Full run over one batch: ingest, aggregate, then preprocess.
    pub async fn run(&self, batch: Vec<RawArticle>) -> Result<()> {
        self.ingest(batch).await?;
        self.recompute_daily_stats().await?;
        self.preprocess_all().await?;
        Ok(())
    }
}

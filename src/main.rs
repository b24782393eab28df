use std::time::Duration;

use clap::Parser;
use tokio::time::MissedTickBehavior;

use news_pipeline::config::Config;
use news_pipeline::error::Result;
use news_pipeline::pipeline::Pipeline;
use news_pipeline::source::{load_batch_file, NewsApiClient};

mod cli;

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (info by default, RUST_LOG overrides)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let command = Cli::parse().command();

    let config = Config::load()?;
    let pipeline = Pipeline::new(&config).await?;

    match command {
        Command::Run => report(run_once(&config, &pipeline).await),
        Command::Schedule => schedule(&config, &pipeline).await,
        Command::Ingest { file } => {
            let batch = load_batch_file(&file)?;
            report(pipeline.ingest(batch).await.map(|_| ()))
        }
        Command::Preprocess => report(pipeline.preprocess_all().await.map(|_| ())),
        Command::Aggregate => report(pipeline.recompute_daily_stats().await.map(|_| ())),
        Command::Export => report(pipeline.export_tokens().await.map(|_| ())),
    }
}

/// Fetch one batch from the news API and run every stage over it.
async fn run_once(config: &Config, pipeline: &Pipeline) -> Result<()> {
    let client = NewsApiClient::from_key(config.news_api_key.as_deref())?;
    let batch = client.fetch(&config.query, config.page_size).await?;
    tracing::info!("Fetched {} articles", batch.len());
    pipeline.run(batch).await
}

/// Log the outcome of a run; failures are also returned to the caller.
fn report(result: Result<()>) -> Result<()> {
    match &result {
        Ok(()) => tracing::info!("Pipeline run succeeded"),
        Err(e) => tracing::error!("Pipeline run failed: {}", e),
    }
    result
}

/// Re-run the full pipeline on a fixed interval until interrupted.
/// A failed run is logged and the loop waits for the next tick.
async fn schedule(config: &Config, pipeline: &Pipeline) -> Result<()> {
    let minutes = u64::from(config.schedule_interval_minutes.max(1));
    let mut ticker = tokio::time::interval(Duration::from_secs(minutes * 60));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    tracing::info!("Running pipeline every {} minutes", minutes);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let _ = report(run_once(config, pipeline).await);
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted, stopping scheduler");
                return Ok(());
            }
        }
    }
}

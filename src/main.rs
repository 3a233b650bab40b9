//! meetup-selector entry point.
//!
//! Loads a seed document into an in-memory store, runs one selection for
//! the configured viewer and criteria, and prints the result as JSON.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use meetup_selector::config::{LogFormat, SelectorConfig};
use meetup_selector::domain::EventStore;
use meetup_selector::seed::SeedData;
use meetup_selector::service::EventService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = SelectorConfig::from_env().context("loading configuration")?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match config.log_format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Pretty => subscriber.init(),
    }

    tracing::info!(
        seed = %config.seed_path.display(),
        viewer = %config.viewer_id,
        criteria = config.criteria.len(),
        "starting meetup-selector"
    );

    let seed = SeedData::from_path(&config.seed_path)
        .await
        .with_context(|| format!("reading seed {}", config.seed_path.display()))?;

    let service = EventService::new(Arc::new(EventStore::new()))
        .with_catalog_warn_threshold(config.catalog_warn_threshold);
    service.load_seed(seed).await.context("loading seed")?;

    let selected = service
        .filtered_events(&config.viewer_id, &config.criteria)
        .await;
    tracing::info!(selected = selected.len(), "selection complete");

    println!("{}", serde_json::to_string_pretty(&selected)?);
    Ok(())
}

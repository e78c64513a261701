//! Batch driver: one reconciliation pass over every stored feed.
//!
//! Invoked by an external scheduler (cron or similar). Feeds are processed
//! sequentially in id order; a failing feed is logged and counted, never
//! aborts the pass.

use feednest_backend::domain::ingest::{EntryReconciler, HttpFetcher};
use feednest_backend::infrastructure::config::Config;
use feednest_backend::infrastructure::db::create_pool;
use feednest_backend::infrastructure::repositories::{EntryRepository, FeedRepository};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fetch_entries=info,feednest_backend=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let pool = Arc::new(create_pool(&config.database_url).await?);
    let feed_repo = FeedRepository::new(pool.clone());
    let entry_repo = Arc::new(EntryRepository::new(pool.clone()));

    let fetcher = Arc::new(HttpFetcher::new()?);
    let reconciler = EntryReconciler::new(fetcher, entry_repo);

    let feeds = feed_repo.list_all().await?;
    tracing::info!("Found {} feeds to process", feeds.len());

    let mut total_new_entries = 0;
    let mut total_entries = 0;
    let mut success_count = 0;
    let mut error_count = 0;

    for feed in &feeds {
        tracing::info!(feed_id = feed.id, url = %feed.url, "Processing {}", feed.title);

        match reconciler.reconcile(feed).await {
            Ok(report) => {
                tracing::info!(
                    feed_id = feed.id,
                    total = report.total_entries,
                    new = report.new_entries,
                    "Feed reconciled"
                );
                total_entries += report.total_entries;
                total_new_entries += report.new_entries;
                success_count += 1;
            }
            Err(err) => {
                tracing::warn!(feed_id = feed.id, error = %err, "Feed failed");
                error_count += 1;
            }
        }
    }

    tracing::info!(
        feeds = feeds.len(),
        successful = success_count,
        failed = error_count,
        total_entries = total_entries,
        new_entries = total_new_entries,
        "Fetch pass complete"
    );

    Ok(())
}

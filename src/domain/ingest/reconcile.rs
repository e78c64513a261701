use super::error::IngestError;
use super::fetcher::DocumentFetcher;
use super::parser::parse_feed_with_entries;
use super::store::EntryStore;
use crate::domain::feed::Feed;
use std::sync::Arc;

/// Counts reported by one reconciliation pass over a feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Entries inserted by this pass.
    pub new_entries: usize,
    /// Entries present in the fetched document.
    pub total_entries: usize,
}

/// Merges a feed's current document against its stored entries.
///
/// Entries are append-only: nothing is ever updated or removed here, even
/// when an already-stored entry's upstream content changed. Reconciling an
/// unchanged document twice reports zero new entries the second time.
pub struct EntryReconciler {
    fetcher: Arc<dyn DocumentFetcher>,
    entries: Arc<dyn EntryStore>,
}

impl EntryReconciler {
    pub fn new(fetcher: Arc<dyn DocumentFetcher>, entries: Arc<dyn EntryStore>) -> Self {
        Self { fetcher, entries }
    }

    pub async fn reconcile(&self, feed: &Feed) -> Result<ReconcileReport, IngestError> {
        let document = self.fetcher.fetch(&feed.url).await?;
        let parsed = parse_feed_with_entries(&document.body)?;

        let total_entries = parsed.entries.len();
        let mut new_entries = 0;

        for entry in &parsed.entries {
            if !self.entries.entry_exists(feed.id, &entry.entry_id).await? {
                self.entries.create_entry(feed.id, entry).await?;
                new_entries += 1;
            }
        }

        Ok(ReconcileReport {
            new_entries,
            total_entries,
        })
    }
}

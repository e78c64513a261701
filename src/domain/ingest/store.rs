use super::parser::ParsedFeedEntry;
use crate::domain::entry::Entry;
use crate::domain::feed::Feed;
use crate::error::AppResult;
use async_trait::async_trait;

/// Feed lookup contract the resolver needs from persistence.
#[async_trait]
pub trait FeedStore: Send + Sync {
    async fn find_by_url(&self, url: &str) -> AppResult<Option<Feed>>;
}

/// Entry contract the reconciler needs from persistence.
///
/// Existence is checked per feed, matching the `(feed_id, entry_id)`
/// uniqueness constraint on the entries table.
#[async_trait]
pub trait EntryStore: Send + Sync {
    async fn entry_exists(&self, feed_id: i64, entry_id: &str) -> AppResult<bool>;

    async fn create_entry(&self, feed_id: i64, entry: &ParsedFeedEntry) -> AppResult<Entry>;
}

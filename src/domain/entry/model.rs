use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One article published by a feed, persisted by the reconciliation engine.
///
/// `(feed_id, entry_id)` is unique and is the sole deduplication key; rows
/// are append-only from the ingestion side.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Entry {
    pub id: i64,
    pub feed_id: i64,
    pub title: String,
    pub url: String,
    pub author: Option<String>,
    pub entry_id: String,
    pub summary: Option<String>,
    pub published: DateTime<Utc>,
    pub updated: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

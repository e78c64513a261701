use crate::domain::entry::Entry;
use crate::domain::ingest::{EntryStore, ParsedFeedEntry};
use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::sync::Arc;

/// Flat row for the unread-entries listing (entry joined to its feed).
#[derive(Debug, Clone, FromRow)]
pub struct UnreadEntryRow {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub published: DateTime<Utc>,
    pub summary: Option<String>,
    pub feed_id: i64,
    pub feed_title: String,
    pub feed_icon_url: Option<String>,
}

pub struct EntryRepository {
    pool: Arc<DbPool>,
}

impl EntryRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Find an entry by ID
    pub async fn find_by_id(&self, entry_id: i64) -> AppResult<Option<Entry>> {
        let pool = self.pool.as_ref();
        let entry = sqlx::query_as::<_, Entry>(
            r#"
            SELECT id, feed_id, title, url, author, entry_id, summary,
                   published, updated, created_at, updated_at
            FROM entries
            WHERE id = $1
            "#,
        )
        .bind(entry_id)
        .fetch_optional(pool)
        .await?;

        Ok(entry)
    }

    /// Whether this feed already stores an entry under this entry_id
    pub async fn exists(&self, feed_id: i64, entry_id: &str) -> AppResult<bool> {
        let pool = self.pool.as_ref();
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM entries
                WHERE feed_id = $1 AND entry_id = $2
            )
            "#,
        )
        .bind(feed_id)
        .bind(entry_id)
        .fetch_one(pool)
        .await?;

        Ok(exists)
    }

    /// Insert a parsed entry for a feed
    pub async fn create(&self, feed_id: i64, parsed: &ParsedFeedEntry) -> AppResult<Entry> {
        let pool = self.pool.as_ref();
        let entry = sqlx::query_as::<_, Entry>(
            r#"
            INSERT INTO entries (feed_id, entry_id, title, url, author, published, summary,
                                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, NOW(), NOW())
            RETURNING id, feed_id, title, url, author, entry_id, summary,
                      published, updated, created_at, updated_at
            "#,
        )
        .bind(feed_id)
        .bind(&parsed.entry_id)
        .bind(&parsed.title)
        .bind(&parsed.url)
        .bind(&parsed.author)
        .bind(parsed.published)
        .bind(&parsed.summary)
        .fetch_one(pool)
        .await?;

        Ok(entry)
    }

    /// Unread entries across a user's subscriptions, newest first.
    /// An entry is unread when it has no user_entries row, or one with
    /// read = false.
    pub async fn find_unread_for_user(&self, user_id: i64) -> AppResult<Vec<UnreadEntryRow>> {
        let pool = self.pool.as_ref();
        let rows = sqlx::query_as::<_, UnreadEntryRow>(
            r#"
            SELECT entries.id, entries.title, entries.url, entries.published, entries.summary,
                   feeds.id AS feed_id, feeds.title AS feed_title, feeds.icon_url AS feed_icon_url
            FROM entries
            LEFT JOIN user_entries
                   ON user_entries.entry_id = entries.id AND user_entries.user_id = $1
            INNER JOIN feeds ON feeds.id = entries.feed_id
            INNER JOIN user_feeds ON user_feeds.feed_id = feeds.id
            WHERE user_feeds.user_id = $1
              AND (user_entries.id IS NULL OR user_entries.read = FALSE)
            ORDER BY entries.published DESC
            LIMIT 200
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    /// Mark one entry read (upsert)
    pub async fn mark_read(&self, user_id: i64, entry_id: i64) -> AppResult<()> {
        let pool = self.pool.as_ref();
        sqlx::query(
            r#"
            INSERT INTO user_entries (user_id, entry_id, read, created_at, updated_at)
            VALUES ($1, $2, TRUE, NOW(), NOW())
            ON CONFLICT (user_id, entry_id)
            DO UPDATE SET read = TRUE, updated_at = NOW()
            "#,
        )
        .bind(user_id)
        .bind(entry_id)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Mark an entry unread by removing its read-state row
    pub async fn delete_user_entry(&self, user_id: i64, entry_id: i64) -> AppResult<()> {
        let pool = self.pool.as_ref();
        sqlx::query("DELETE FROM user_entries WHERE user_id = $1 AND entry_id = $2")
            .bind(user_id)
            .bind(entry_id)
            .execute(pool)
            .await?;

        Ok(())
    }

    /// Of the given ids, the ones that reference stored entries
    pub async fn filter_existing_ids(&self, ids: &[i64]) -> AppResult<Vec<i64>> {
        let pool = self.pool.as_ref();
        let existing = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT id FROM entries WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(pool)
        .await?;

        Ok(existing)
    }

    /// Bulk mark entries read (upsert per pair)
    pub async fn mark_many_read(&self, user_id: i64, entry_ids: &[i64]) -> AppResult<()> {
        let pool = self.pool.as_ref();
        sqlx::query(
            r#"
            INSERT INTO user_entries (user_id, entry_id, read, created_at, updated_at)
            SELECT $1, unnest($2::bigint[]), TRUE, NOW(), NOW()
            ON CONFLICT (user_id, entry_id)
            DO UPDATE SET read = TRUE, updated_at = NOW()
            "#,
        )
        .bind(user_id)
        .bind(entry_ids)
        .execute(pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl EntryStore for EntryRepository {
    async fn entry_exists(&self, feed_id: i64, entry_id: &str) -> AppResult<bool> {
        self.exists(feed_id, entry_id).await
    }

    async fn create_entry(&self, feed_id: i64, entry: &ParsedFeedEntry) -> AppResult<Entry> {
        self.create(feed_id, entry).await
    }
}

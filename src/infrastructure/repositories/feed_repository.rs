use crate::domain::feed::{Feed, UserFeed};
use crate::domain::ingest::FeedStore;
use crate::error::{AppError, AppResult};
use crate::infrastructure::db::DbPool;
use async_trait::async_trait;
use std::sync::Arc;

pub struct FeedRepository {
    pool: Arc<DbPool>,
}

impl FeedRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Find a feed by its exact URL string
    pub async fn find_by_url(&self, url: &str) -> AppResult<Option<Feed>> {
        let pool = self.pool.as_ref();
        let feed = sqlx::query_as::<_, Feed>(
            r#"
            SELECT id, title, icon_url, url, created_at, updated_at
            FROM feeds
            WHERE url = $1
            "#,
        )
        .bind(url)
        .fetch_optional(pool)
        .await?;

        Ok(feed)
    }

    /// Find a feed by ID
    pub async fn find_by_id(&self, feed_id: i64) -> AppResult<Option<Feed>> {
        let pool = self.pool.as_ref();
        let feed = sqlx::query_as::<_, Feed>(
            r#"
            SELECT id, title, icon_url, url, created_at, updated_at
            FROM feeds
            WHERE id = $1
            "#,
        )
        .bind(feed_id)
        .fetch_optional(pool)
        .await?;

        Ok(feed)
    }

    /// Create a new feed
    pub async fn create(&self, title: &str, url: &str, icon_url: Option<&str>) -> AppResult<Feed> {
        let pool = self.pool.as_ref();
        let feed = sqlx::query_as::<_, Feed>(
            r#"
            INSERT INTO feeds (title, url, icon_url, created_at, updated_at)
            VALUES ($1, $2, $3, NOW(), NOW())
            RETURNING id, title, icon_url, url, created_at, updated_at
            "#,
        )
        .bind(title)
        .bind(url)
        .bind(icon_url)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.is_unique_violation() {
                    return AppError::Conflict("Feed URL already exists".to_string());
                }
            }
            AppError::Database(e)
        })?;

        Ok(feed)
    }

    /// All feeds, in id order (batch reconciliation walks this)
    pub async fn list_all(&self) -> AppResult<Vec<Feed>> {
        let pool = self.pool.as_ref();
        let feeds = sqlx::query_as::<_, Feed>(
            r#"
            SELECT id, title, icon_url, url, created_at, updated_at
            FROM feeds
            ORDER BY id
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(feeds)
    }

    /// Feeds a user subscribes to, newest subscription first
    pub async fn find_by_user(&self, user_id: i64) -> AppResult<Vec<Feed>> {
        let pool = self.pool.as_ref();
        let feeds = sqlx::query_as::<_, Feed>(
            r#"
            SELECT feeds.id, feeds.title, feeds.icon_url, feeds.url,
                   feeds.created_at, feeds.updated_at
            FROM feeds
            INNER JOIN user_feeds ON user_feeds.feed_id = feeds.id
            WHERE user_feeds.user_id = $1
            ORDER BY user_feeds.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(feeds)
    }

    /// Find a user's subscription to a feed
    pub async fn find_user_feed(&self, user_id: i64, feed_id: i64) -> AppResult<Option<UserFeed>> {
        let pool = self.pool.as_ref();
        let user_feed = sqlx::query_as::<_, UserFeed>(
            r#"
            SELECT id, user_id, feed_id, created_at, updated_at
            FROM user_feeds
            WHERE user_id = $1 AND feed_id = $2
            "#,
        )
        .bind(user_id)
        .bind(feed_id)
        .fetch_optional(pool)
        .await?;

        Ok(user_feed)
    }

    /// Subscribe a user to a feed
    pub async fn create_user_feed(&self, user_id: i64, feed_id: i64) -> AppResult<UserFeed> {
        let pool = self.pool.as_ref();
        let user_feed = sqlx::query_as::<_, UserFeed>(
            r#"
            INSERT INTO user_feeds (user_id, feed_id, created_at, updated_at)
            VALUES ($1, $2, NOW(), NOW())
            RETURNING id, user_id, feed_id, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(feed_id)
        .fetch_one(pool)
        .await?;

        Ok(user_feed)
    }

    /// Remove a user's subscription (the feed row itself stays)
    pub async fn delete_user_feed(&self, user_id: i64, feed_id: i64) -> AppResult<()> {
        let pool = self.pool.as_ref();
        sqlx::query("DELETE FROM user_feeds WHERE user_id = $1 AND feed_id = $2")
            .bind(user_id)
            .bind(feed_id)
            .execute(pool)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl FeedStore for FeedRepository {
    async fn find_by_url(&self, url: &str) -> AppResult<Option<Feed>> {
        FeedRepository::find_by_url(self, url).await
    }
}

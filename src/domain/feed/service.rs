use super::error::FeedServiceError;
use crate::domain::feed::{Feed, FeedOption, FeedResponse, SubscribeRequest};
use crate::domain::ingest::{FeedResolver, Resolution};
use crate::infrastructure::repositories::FeedRepository;
use async_trait::async_trait;
use std::sync::Arc;

/// What a subscribe call produced: a feed attached to the user, or a list
/// of discovered candidates the user must pick from.
#[derive(Debug)]
pub enum SubscribeOutcome {
    Subscribed(Feed),
    NeedsChoice(Vec<FeedOption>),
}

pub struct FeedService {
    feed_repo: Arc<FeedRepository>,
    resolver: Arc<FeedResolver>,
}

impl FeedService {
    pub fn new(feed_repo: Arc<FeedRepository>, resolver: Arc<FeedResolver>) -> Self {
        Self {
            feed_repo,
            resolver,
        }
    }
}

#[async_trait]
pub trait FeedServiceApi: Send + Sync {
    async fn subscribe(
        &self,
        user_id: i64,
        request: SubscribeRequest,
    ) -> Result<SubscribeOutcome, FeedServiceError>;

    async fn get_user_feeds(&self, user_id: i64) -> Result<Vec<FeedResponse>, FeedServiceError>;

    async fn unsubscribe(&self, user_id: i64, feed_id: i64) -> Result<(), FeedServiceError>;
}

#[async_trait]
impl FeedServiceApi for FeedService {
    async fn subscribe(
        &self,
        user_id: i64,
        request: SubscribeRequest,
    ) -> Result<SubscribeOutcome, FeedServiceError> {
        let url = request.url.unwrap_or_default();
        if url.trim().is_empty() {
            return Err(FeedServiceError::Invalid("URL is blank".to_string()));
        }

        match self.resolver.resolve(&url).await? {
            Resolution::Existing(feed) => {
                self.attach(user_id, feed.id).await?;
                Ok(SubscribeOutcome::Subscribed(feed))
            }
            Resolution::Resolved(resolved) => {
                let feed = self
                    .feed_repo
                    .create(&resolved.title, &resolved.url, resolved.icon_url.as_deref())
                    .await?;
                self.attach(user_id, feed.id).await?;
                Ok(SubscribeOutcome::Subscribed(feed))
            }
            Resolution::Ambiguous(options) => Ok(SubscribeOutcome::NeedsChoice(options)),
        }
    }

    async fn get_user_feeds(&self, user_id: i64) -> Result<Vec<FeedResponse>, FeedServiceError> {
        let feeds = self.feed_repo.find_by_user(user_id).await?;
        Ok(feeds.into_iter().map(FeedResponse::from).collect())
    }

    async fn unsubscribe(&self, user_id: i64, feed_id: i64) -> Result<(), FeedServiceError> {
        self.feed_repo
            .find_by_id(feed_id)
            .await?
            .ok_or(FeedServiceError::NotFound)?;

        if self.feed_repo.find_user_feed(user_id, feed_id).await?.is_some() {
            self.feed_repo.delete_user_feed(user_id, feed_id).await?;
        }

        Ok(())
    }
}

impl FeedService {
    /// Subscribing is idempotent: an existing association is left untouched.
    async fn attach(&self, user_id: i64, feed_id: i64) -> Result<(), FeedServiceError> {
        if self.feed_repo.find_user_feed(user_id, feed_id).await?.is_none() {
            self.feed_repo.create_user_feed(user_id, feed_id).await?;
        }
        Ok(())
    }
}

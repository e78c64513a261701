pub mod error;
pub mod model;
pub mod service;

pub use error::FeedServiceError;
pub use model::{Feed, FeedOption, UserFeed};
pub use service::{FeedService, FeedServiceApi, SubscribeOutcome};

use serde::{Deserialize, Serialize};

/// Response for feed endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct FeedResponse {
    pub id: i64,
    pub title: String,
    pub icon_url: Option<String>,
    pub url: String,
}

/// Request to subscribe to a feed by URL
#[derive(Debug, Serialize, Deserialize)]
pub struct SubscribeRequest {
    pub url: Option<String>,
}

/// Subscribe responses mirror the resolution outcome: either the feed that
/// was attached, or the candidate list the caller must choose from.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SubscribeResponse {
    Feed(FeedResponse),
    Options { options: Vec<FeedOption> },
}

impl From<Feed> for FeedResponse {
    fn from(feed: Feed) -> Self {
        Self {
            id: feed.id,
            title: feed.title,
            icon_url: feed.icon_url,
            url: feed.url,
        }
    }
}

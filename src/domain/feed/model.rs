use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A subscribed RSS/Atom source, identified by its canonical URL.
///
/// Title and icon are captured once at creation and never refreshed: a
/// feed's displayed identity stays stable even if the source renames itself.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Feed {
    pub id: i64,
    pub title: String,
    pub icon_url: Option<String>,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user's subscription to a feed.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserFeed {
    pub id: i64,
    pub user_id: i64,
    pub feed_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A candidate feed discovered on an HTML page, pending disambiguation.
/// Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedOption {
    pub title: Option<String>,
    pub url: String,
}

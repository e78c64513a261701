pub mod error;
pub mod model;
pub mod service;

pub use error::EntryServiceError;
pub use model::Entry;
pub use service::{EntryService, EntryServiceApi};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One unread entry as returned to the client, with its feed's identity.
#[derive(Debug, Serialize, Deserialize)]
pub struct EntryResponse {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub published: DateTime<Utc>,
    pub summary: Option<String>,
    pub feed: EntryFeedInfo,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EntryFeedInfo {
    pub id: i64,
    pub title: String,
    pub icon_url: Option<String>,
}

/// Bulk read request: comma-separated entry ids, as the client sends them.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadAllRequest {
    pub ids: Option<String>,
}

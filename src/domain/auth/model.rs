use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Server-side auth token. Tokens are opaque random strings; the `regular`
/// kind authenticates API requests, the `refresh` kind can only be traded
/// for a new pair.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AuthToken {
    pub id: i64,
    pub user_id: i64,
    pub token: String,
    pub kind: TokenKind,
    pub expire_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text")]
#[sqlx(rename_all = "lowercase")]
pub enum TokenKind {
    #[serde(rename = "regular")]
    Regular,
    #[serde(rename = "refresh")]
    Refresh,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Regular => write!(f, "regular"),
            TokenKind::Refresh => write!(f, "refresh"),
        }
    }
}

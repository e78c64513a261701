use crate::domain::auth::{AuthToken, TokenKind};
use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use chrono::{DateTime, Utc};
use std::sync::Arc;

pub struct AuthTokenRepository {
    pool: Arc<DbPool>,
}

impl AuthTokenRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Store a new token
    pub async fn create(
        &self,
        user_id: i64,
        token: &str,
        kind: TokenKind,
        expire_at: DateTime<Utc>,
    ) -> AppResult<AuthToken> {
        let pool = self.pool.as_ref();
        let stored = sqlx::query_as::<_, AuthToken>(
            r#"
            INSERT INTO auth_tokens (user_id, token, kind, expire_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NOW(), NOW())
            RETURNING id, user_id, token, kind, expire_at, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(token)
        .bind(kind)
        .bind(expire_at)
        .fetch_one(pool)
        .await?;

        Ok(stored)
    }

    /// Find a token regardless of kind or expiry; callers check both.
    pub async fn find_by_token(&self, token: &str) -> AppResult<Option<AuthToken>> {
        let pool = self.pool.as_ref();
        let stored = sqlx::query_as::<_, AuthToken>(
            r#"
            SELECT id, user_id, token, kind, expire_at, created_at, updated_at
            FROM auth_tokens
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(pool)
        .await?;

        Ok(stored)
    }

    /// Find an unexpired token of the given kind
    pub async fn find_valid(&self, token: &str, kind: TokenKind) -> AppResult<Option<AuthToken>> {
        let pool = self.pool.as_ref();
        let stored = sqlx::query_as::<_, AuthToken>(
            r#"
            SELECT id, user_id, token, kind, expire_at, created_at, updated_at
            FROM auth_tokens
            WHERE token = $1 AND kind = $2 AND expire_at > NOW()
            "#,
        )
        .bind(token)
        .bind(kind)
        .fetch_optional(pool)
        .await?;

        Ok(stored)
    }

    /// Delete a token
    pub async fn delete(&self, token: &str) -> AppResult<()> {
        let pool = self.pool.as_ref();
        sqlx::query("DELETE FROM auth_tokens WHERE token = $1")
            .bind(token)
            .execute(pool)
            .await?;

        Ok(())
    }
}

use super::dto::{LoginRequest, RefreshTokenRequest, TokenPairResponse};
use super::model::TokenKind;
use super::password::verify_password;
use crate::{
    error::{AppError, AppResult},
    infrastructure::repositories::{AuthTokenRepository, UserRepository},
};
use chrono::{Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

pub struct AuthService {
    user_repo: Arc<UserRepository>,
    token_repo: Arc<AuthTokenRepository>,
    token_expiration_hours: i64,
    refresh_token_expiration_days: i64,
}

impl AuthService {
    pub fn new(
        user_repo: Arc<UserRepository>,
        token_repo: Arc<AuthTokenRepository>,
        token_expiration_hours: i64,
        refresh_token_expiration_days: i64,
    ) -> Self {
        Self {
            user_repo,
            token_repo,
            token_expiration_hours,
            refresh_token_expiration_days,
        }
    }

    /// Authenticate with email/password and issue a regular + refresh pair.
    pub async fn login(&self, request: LoginRequest) -> AppResult<TokenPairResponse> {
        let (email, password) = match (request.email, request.password) {
            (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
                (email, password)
            }
            _ => {
                return Err(AppError::BadRequest(
                    "Email and password are required".to_string(),
                ))
            }
        };

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid email or password".to_string()))?;

        verify_password(&password, &user.password_hash)
            .map_err(|_| AppError::Unauthorized("Invalid email or password".to_string()))?;

        self.issue_token_pair(user.id).await
    }

    /// Trade a valid refresh token for a new pair; the consumed refresh
    /// token is deleted so it cannot be replayed.
    pub async fn refresh(&self, request: RefreshTokenRequest) -> AppResult<TokenPairResponse> {
        let refresh_token = request
            .refresh_token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AppError::BadRequest("Refresh token is required".to_string()))?;

        let stored = self
            .token_repo
            .find_by_token(&refresh_token)
            .await?
            .ok_or(AppError::InvalidRefreshToken)?;

        if stored.kind != TokenKind::Refresh {
            return Err(AppError::InvalidRefreshToken);
        }

        if stored.expire_at < Utc::now() {
            return Err(AppError::RefreshTokenExpired);
        }

        let pair = self.issue_token_pair(stored.user_id).await?;

        self.token_repo.delete(&refresh_token).await?;

        Ok(pair)
    }

    async fn issue_token_pair(&self, user_id: i64) -> AppResult<TokenPairResponse> {
        let regular = self.issue_token(user_id, TokenKind::Regular).await?;
        let refresh = self.issue_token(user_id, TokenKind::Refresh).await?;

        Ok(TokenPairResponse {
            regular_token: regular,
            refresh_token: refresh,
        })
    }

    async fn issue_token(&self, user_id: i64, kind: TokenKind) -> AppResult<String> {
        let token = generate_token();
        let expire_at = match kind {
            TokenKind::Regular => Utc::now() + Duration::hours(self.token_expiration_hours),
            TokenKind::Refresh => Utc::now() + Duration::days(self.refresh_token_expiration_days),
        };

        self.token_repo
            .create(user_id, &token, kind, expire_at)
            .await?;

        Ok(token)
    }
}

/// Generate an opaque token: 64 hex characters of random material.
pub fn generate_token() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_tokens_are_unique_and_hex() {
        let a = generate_token();
        let b = generate_token();

        assert_ne!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }
}

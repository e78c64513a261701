use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::domain::auth::TokenKind;
use crate::{
    error::AppError,
    infrastructure::repositories::{AuthTokenRepository, UserRepository},
};

/// User context injected into request extensions after authentication
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i64,
    pub email: String,
}

/// Authentication middleware.
///
/// Resolves `Authorization: Bearer <token>` against stored unexpired
/// regular tokens; the matching user is attached to the request.
pub async fn auth_middleware(
    State((token_repo, user_repo)): State<(Arc<AuthTokenRepository>, Arc<UserRepository>)>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Extract Authorization header
    let auth_header = request
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".to_string()))?;

    // Check Bearer token format
    if !auth_header.starts_with("Bearer ") {
        return Err(AppError::Unauthorized(
            "Invalid authorization format".to_string(),
        ));
    }

    let token = &auth_header[7..]; // Skip "Bearer "

    // Only unexpired regular tokens authenticate API requests
    let stored = token_repo
        .find_valid(token, TokenKind::Regular)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid or expired token".to_string()))?;

    let user = user_repo
        .find_by_id(stored.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

    // Add user context to request
    request.extensions_mut().insert(AuthUser {
        user_id: user.id,
        email: user.email,
    });

    Ok(next.run(request).await)
}

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::domain::auth::{AuthService, LoginRequest, RefreshTokenRequest, TokenPairResponse};
use crate::domain::user::{RegisterRequest, UserService, UserServiceApi};
use crate::error::AppResult;

pub struct UserController {
    user_service: Arc<UserService>,
    auth_service: Arc<AuthService>,
}

impl UserController {
    pub fn new(user_service: Arc<UserService>, auth_service: Arc<AuthService>) -> Self {
        Self {
            user_service,
            auth_service,
        }
    }

    /// POST /api/users - Create new account
    pub async fn register(
        State(controller): State<Arc<UserController>>,
        Json(request): Json<RegisterRequest>,
    ) -> AppResult<(StatusCode, Json<Value>)> {
        controller.user_service.register(request).await?;
        Ok((StatusCode::CREATED, Json(json!({ "success": true }))))
    }

    /// POST /api/users/login - Login, issuing a token pair
    pub async fn login(
        State(controller): State<Arc<UserController>>,
        Json(request): Json<LoginRequest>,
    ) -> AppResult<Json<TokenPairResponse>> {
        let tokens = controller.auth_service.login(request).await?;
        Ok(Json(tokens))
    }

    /// POST /api/users/refresh - Trade a refresh token for a new pair
    pub async fn refresh(
        State(controller): State<Arc<UserController>>,
        Json(request): Json<RefreshTokenRequest>,
    ) -> AppResult<Json<TokenPairResponse>> {
        let tokens = controller.auth_service.refresh(request).await?;
        Ok(Json(tokens))
    }
}

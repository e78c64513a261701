use serde::{Deserialize, Serialize};

/// Login request
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Token pair issued on login and refresh
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPairResponse {
    pub regular_token: String,
    pub refresh_token: String,
}

/// Refresh token request
#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: Option<String>,
}

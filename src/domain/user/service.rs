use super::error::UserServiceError;
use crate::domain::auth::password::{hash_password, validate_password, PasswordError};
use crate::domain::user::RegisterRequest;
use crate::infrastructure::repositories::UserRepository;
use async_trait::async_trait;
use std::sync::Arc;

pub struct UserService {
    user_repo: Arc<UserRepository>,
}

impl UserService {
    pub fn new(user_repo: Arc<UserRepository>) -> Self {
        Self { user_repo }
    }
}

#[async_trait]
pub trait UserServiceApi: Send + Sync {
    async fn register(&self, request: RegisterRequest) -> Result<(), UserServiceError>;
}

#[async_trait]
impl UserServiceApi for UserService {
    async fn register(&self, request: RegisterRequest) -> Result<(), UserServiceError> {
        let (email, password) = match (request.email, request.password) {
            (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
                (email, password)
            }
            _ => {
                return Err(UserServiceError::Invalid(
                    "Email and password are required".to_string(),
                ))
            }
        };

        validate_email(&email)?;

        validate_password(&password).map_err(|err| match err {
            PasswordError::TooShort => UserServiceError::Invalid(
                "Password must be at least 8 characters".to_string(),
            ),
            other => UserServiceError::Dependency(other.to_string()),
        })?;

        if self.user_repo.find_by_email(&email).await?.is_some() {
            return Err(UserServiceError::EmailTaken);
        }

        let password_hash = hash_password(&password)
            .map_err(|err| UserServiceError::Dependency(err.to_string()))?;

        self.user_repo.create(&email, &password_hash).await?;

        Ok(())
    }
}

fn validate_email(email: &str) -> Result<(), UserServiceError> {
    let pattern = regex::Regex::new(r"^[^@\s]+@[^@\s]+$").unwrap();
    if pattern.is_match(email) {
        Ok(())
    } else {
        Err(UserServiceError::Invalid("Invalid email format".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("a@b").is_ok());
    }

    #[test]
    fn rejects_missing_at_sign_and_whitespace() {
        assert!(validate_email("userexample.com").is_err());
        assert!(validate_email("user @example.com").is_err());
        assert!(validate_email("user@exam ple.com").is_err());
        assert!(validate_email("").is_err());
    }
}

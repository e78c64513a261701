pub mod error;
pub mod model;
pub mod service;

pub use error::UserServiceError;
pub use model::User;
pub use service::{UserService, UserServiceApi};

use serde::{Deserialize, Serialize};

/// Request to create a new account
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

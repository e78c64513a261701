use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum EntryServiceError {
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("entry not found")]
    NotFound,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<AppError> for EntryServiceError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::BadRequest(msg) => EntryServiceError::Invalid(msg),
            AppError::NotFound(_) => EntryServiceError::NotFound,
            _ => EntryServiceError::Dependency(err.to_string()),
        }
    }
}

impl From<EntryServiceError> for AppError {
    fn from(err: EntryServiceError) -> Self {
        match err {
            EntryServiceError::Invalid(msg) => AppError::BadRequest(msg),
            EntryServiceError::NotFound => AppError::NotFound("Entry not found".to_string()),
            EntryServiceError::Dependency(msg) => AppError::Internal(msg),
            EntryServiceError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}

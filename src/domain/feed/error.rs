use crate::domain::ingest::IngestError;
use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum FeedServiceError {
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("feed not found")]
    NotFound,
    #[error("feed already exists")]
    Conflict,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<AppError> for FeedServiceError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::BadRequest(msg) => FeedServiceError::Invalid(msg),
            AppError::NotFound(_) => FeedServiceError::NotFound,
            AppError::Conflict(_) => FeedServiceError::Conflict,
            _ => FeedServiceError::Dependency(err.to_string()),
        }
    }
}

impl From<FeedServiceError> for AppError {
    fn from(err: FeedServiceError) -> Self {
        match err {
            FeedServiceError::Invalid(msg) => AppError::BadRequest(msg),
            FeedServiceError::NotFound => AppError::NotFound("Feed not found".to_string()),
            FeedServiceError::Conflict => AppError::Conflict("Feed URL already exists".to_string()),
            FeedServiceError::Dependency(msg) => AppError::Internal(msg),
            FeedServiceError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}

/// Resolution failures surface with the messages the subscribe flow shows
/// to users: "could not find any feed" stays distinct from "could not parse".
impl From<IngestError> for FeedServiceError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::InvalidUrl => FeedServiceError::Invalid("URL is not valid".to_string()),
            IngestError::FetchFailed | IngestError::NoFeedsFound => {
                FeedServiceError::Invalid("Not able to find feed".to_string())
            }
            IngestError::ParseFailed => {
                FeedServiceError::Invalid("Not able to parse feed".to_string())
            }
            IngestError::Store(err) => err.into(),
        }
    }
}

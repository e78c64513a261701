use crate::error::AppError;

/// Errors produced by the ingestion pipeline.
///
/// Fetch failures are deliberately opaque: network errors, timeouts,
/// redirect exhaustion and non-200 statuses all collapse into
/// [`IngestError::FetchFailed`]. Callers only need to know that no usable
/// document was obtained.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("URL is not valid")]
    InvalidUrl,

    #[error("failed to fetch document")]
    FetchFailed,

    #[error("failed to parse feed document")]
    ParseFailed,

    #[error("no feed links found in page")]
    NoFeedsFound,

    /// Persistence collaborator failure, propagated unchanged.
    #[error(transparent)]
    Store(#[from] AppError),
}

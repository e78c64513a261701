use super::error::EntryServiceError;
use crate::domain::entry::{EntryFeedInfo, EntryResponse, ReadAllRequest};
use crate::infrastructure::repositories::EntryRepository;
use async_trait::async_trait;
use std::sync::Arc;

pub struct EntryService {
    entry_repo: Arc<EntryRepository>,
}

impl EntryService {
    pub fn new(entry_repo: Arc<EntryRepository>) -> Self {
        Self { entry_repo }
    }
}

#[async_trait]
pub trait EntryServiceApi: Send + Sync {
    /// Unread entries across the user's subscriptions, newest first.
    async fn get_unread_entries(
        &self,
        user_id: i64,
    ) -> Result<Vec<EntryResponse>, EntryServiceError>;

    async fn mark_read(&self, user_id: i64, entry_id: i64) -> Result<(), EntryServiceError>;

    async fn mark_unread(&self, user_id: i64, entry_id: i64) -> Result<(), EntryServiceError>;

    async fn mark_all_read(
        &self,
        user_id: i64,
        request: ReadAllRequest,
    ) -> Result<(), EntryServiceError>;
}

#[async_trait]
impl EntryServiceApi for EntryService {
    async fn get_unread_entries(
        &self,
        user_id: i64,
    ) -> Result<Vec<EntryResponse>, EntryServiceError> {
        let rows = self.entry_repo.find_unread_for_user(user_id).await?;

        Ok(rows
            .into_iter()
            .map(|row| EntryResponse {
                id: row.id,
                title: row.title,
                url: row.url,
                published: row.published,
                summary: row.summary,
                feed: EntryFeedInfo {
                    id: row.feed_id,
                    title: row.feed_title,
                    icon_url: row.feed_icon_url,
                },
            })
            .collect())
    }

    async fn mark_read(&self, user_id: i64, entry_id: i64) -> Result<(), EntryServiceError> {
        self.entry_repo
            .find_by_id(entry_id)
            .await?
            .ok_or(EntryServiceError::NotFound)?;

        self.entry_repo.mark_read(user_id, entry_id).await?;
        Ok(())
    }

    async fn mark_unread(&self, user_id: i64, entry_id: i64) -> Result<(), EntryServiceError> {
        self.entry_repo
            .find_by_id(entry_id)
            .await?
            .ok_or(EntryServiceError::NotFound)?;

        self.entry_repo.delete_user_entry(user_id, entry_id).await?;
        Ok(())
    }

    async fn mark_all_read(
        &self,
        user_id: i64,
        request: ReadAllRequest,
    ) -> Result<(), EntryServiceError> {
        let ids_param = request.ids.ok_or_else(|| {
            EntryServiceError::Invalid("Missing or invalid ids parameter".to_string())
        })?;

        // Unparseable fragments are dropped, not errors.
        let ids: Vec<i64> = ids_param
            .split(',')
            .filter_map(|id| id.trim().parse().ok())
            .collect();

        if ids.is_empty() {
            return Ok(());
        }

        // Ids that don't reference a stored entry are silently skipped.
        let valid_ids = self.entry_repo.filter_existing_ids(&ids).await?;
        if valid_ids.is_empty() {
            return Ok(());
        }

        self.entry_repo.mark_many_read(user_id, &valid_ids).await?;
        Ok(())
    }
}

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::domain::entry::{EntryResponse, EntryService, EntryServiceApi, ReadAllRequest};
use crate::{error::AppResult, infrastructure::auth::AuthUser};

pub struct EntryController {
    entry_service: Arc<EntryService>,
}

impl EntryController {
    pub fn new(entry_service: Arc<EntryService>) -> Self {
        Self { entry_service }
    }

    /// GET /api/entries - Unread entries from the user's subscriptions
    pub async fn list_unread(
        State(controller): State<Arc<EntryController>>,
        Extension(auth_user): Extension<AuthUser>,
    ) -> AppResult<Json<Vec<EntryResponse>>> {
        let entries = controller
            .entry_service
            .get_unread_entries(auth_user.user_id)
            .await?;
        Ok(Json(entries))
    }

    /// POST /api/entries/{id}/read - Mark an entry as read
    pub async fn mark_read(
        State(controller): State<Arc<EntryController>>,
        Extension(auth_user): Extension<AuthUser>,
        Path(entry_id): Path<i64>,
    ) -> AppResult<Json<Value>> {
        controller
            .entry_service
            .mark_read(auth_user.user_id, entry_id)
            .await?;
        Ok(Json(json!({ "success": true })))
    }

    /// POST /api/entries/{id}/unread - Mark an entry as unread
    pub async fn mark_unread(
        State(controller): State<Arc<EntryController>>,
        Extension(auth_user): Extension<AuthUser>,
        Path(entry_id): Path<i64>,
    ) -> AppResult<Json<Value>> {
        controller
            .entry_service
            .mark_unread(auth_user.user_id, entry_id)
            .await?;
        Ok(Json(json!({ "success": true })))
    }

    /// POST /api/entries/read_all - Bulk mark entries as read
    pub async fn read_all(
        State(controller): State<Arc<EntryController>>,
        Extension(auth_user): Extension<AuthUser>,
        Json(request): Json<ReadAllRequest>,
    ) -> AppResult<Json<Value>> {
        controller
            .entry_service
            .mark_all_read(auth_user.user_id, request)
            .await?;
        Ok(Json(json!({ "success": true })))
    }
}

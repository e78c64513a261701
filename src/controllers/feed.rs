use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::domain::feed::{
    FeedResponse, FeedService, FeedServiceApi, SubscribeOutcome, SubscribeRequest,
    SubscribeResponse,
};
use crate::{error::AppResult, infrastructure::auth::AuthUser};

pub struct FeedController {
    feed_service: Arc<FeedService>,
}

impl FeedController {
    pub fn new(feed_service: Arc<FeedService>) -> Self {
        Self { feed_service }
    }

    /// POST /api/feeds - Subscribe to a feed by URL
    ///
    /// Responds with the attached feed, or with `{"options": [...]}` when the
    /// URL led to a page advertising several feeds.
    pub async fn subscribe(
        State(controller): State<Arc<FeedController>>,
        Extension(auth_user): Extension<AuthUser>,
        Json(request): Json<SubscribeRequest>,
    ) -> AppResult<Json<SubscribeResponse>> {
        let outcome = controller
            .feed_service
            .subscribe(auth_user.user_id, request)
            .await?;

        let response = match outcome {
            SubscribeOutcome::Subscribed(feed) => SubscribeResponse::Feed(FeedResponse::from(feed)),
            SubscribeOutcome::NeedsChoice(options) => SubscribeResponse::Options { options },
        };

        Ok(Json(response))
    }

    /// GET /api/feeds - List user's feeds
    pub async fn list_feeds(
        State(controller): State<Arc<FeedController>>,
        Extension(auth_user): Extension<AuthUser>,
    ) -> AppResult<Json<Vec<FeedResponse>>> {
        let feeds = controller
            .feed_service
            .get_user_feeds(auth_user.user_id)
            .await?;
        Ok(Json(feeds))
    }

    /// DELETE /api/feeds/{feedId} - Unsubscribe from a feed
    pub async fn unsubscribe(
        State(controller): State<Arc<FeedController>>,
        Extension(auth_user): Extension<AuthUser>,
        Path(feed_id): Path<i64>,
    ) -> AppResult<Json<Value>> {
        controller
            .feed_service
            .unsubscribe(auth_user.user_id, feed_id)
            .await?;
        Ok(Json(json!({ "success": true })))
    }
}

use axum::{extract::State, http::StatusCode, Extension, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use brandmon_core::{Engagement, Mention, Platform, Sentiment};

use crate::middleware::AuthUser;

use super::{map_db_error, ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct CreateMentionRequest {
    content: Option<String>,
    platform: Option<Platform>,
    author: Option<String>,
    sentiment: Option<Sentiment>,
    url: Option<String>,
    engagement: Option<Engagement>,
}

#[derive(Debug, Deserialize)]
pub(super) struct DeleteMentionsRequest {
    ids: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub(super) struct DeleteResult {
    count: u64,
}

/// `GET /api/v1/mentions` — the owner's mentions, newest first.
pub(super) async fn list_mentions(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
) -> Result<Json<ApiResponse<Vec<Mention>>>, ApiError> {
    let rows = brandmon_db::list_mentions_for_user(&state.pool, user_id)
        .await
        .map_err(|e| map_db_error(&e))?;

    let mentions = rows
        .into_iter()
        .map(brandmon_db::MentionRow::into_mention)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| map_db_error(&e))?;

    Ok(Json(ApiResponse::new(mentions)))
}

/// `POST /api/v1/mentions` — manual creation of a single mention.
pub(super) async fn create_mention(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Json(body): Json<CreateMentionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Mention>>), ApiError> {
    let (Some(content), Some(platform), Some(author), Some(sentiment)) =
        (body.content, body.platform, body.author, body.sentiment)
    else {
        return Err(ApiError::bad_request("missing required fields"));
    };

    let now = Utc::now();
    let mention = Mention {
        id: Uuid::new_v4().to_string(),
        content,
        platform,
        author,
        sentiment,
        url: body.url,
        engagement: body.engagement,
        created_at: now,
        updated_at: now,
    };

    let row = brandmon_db::create_mention(&state.pool, user_id, &mention)
        .await
        .map_err(|e| map_db_error(&e))?;
    let saved = row.into_mention().map_err(|e| map_db_error(&e))?;

    Ok((StatusCode::CREATED, Json(ApiResponse::new(saved))))
}

/// `DELETE /api/v1/mentions` — bulk delete by id, owner-scoped.
pub(super) async fn delete_mentions(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Json(body): Json<DeleteMentionsRequest>,
) -> Result<Json<ApiResponse<DeleteResult>>, ApiError> {
    let ids = match body.ids {
        Some(ids) if !ids.is_empty() => ids,
        _ => return Err(ApiError::bad_request("missing or invalid mention ids")),
    };

    let count = brandmon_db::delete_mentions(&state.pool, user_id, &ids)
        .await
        .map_err(|e| map_db_error(&e))?;

    Ok(Json(ApiResponse::new(DeleteResult { count })))
}

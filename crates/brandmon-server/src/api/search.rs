//! Ingestion entry points: cross-platform keyword search and the direct
//! per-platform searches.

use std::str::FromStr;

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use futures::future::join_all;
use serde::{Deserialize, Serialize};

use brandmon_core::{Mention, Platform, TimeRange};

use crate::middleware::AuthUser;

use super::{map_db_error, ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct SearchQuery {
    keyword: Option<String>,
    platform: Option<String>,
    #[serde(rename = "timeRange", alias = "time_range")]
    time_range: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct SearchStats {
    total: usize,
    #[serde(rename = "byPlatform")]
    by_platform: serde_json::Map<String, serde_json::Value>,
}

/// The cross-platform search response shape the dashboard consumes:
/// `{success, data, stats: {total, byPlatform}}`.
#[derive(Debug, Serialize)]
pub(super) struct SearchResponseBody {
    success: bool,
    data: Vec<Mention>,
    stats: SearchStats,
}

/// `GET /api/v1/search?keyword=&platform=&timeRange=`
///
/// Fans the orchestrator out across the requested platforms (all four when
/// none is named), persists every normalized mention keyed `(id, owner)`,
/// and answers with the saved set plus per-platform counts.
pub(super) async fn cross_platform_search(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponseBody>, ApiError> {
    let keyword = required_keyword(query.keyword.as_deref())?;
    let time_range = parse_time_range(query.time_range.as_deref())?;

    let platforms: Vec<Platform> = match query.platform.as_deref() {
        Some(name) => vec![parse_platform(name)?],
        None => Platform::ALL.to_vec(),
    };

    tracing::info!(keyword, platforms = ?platforms, "running cross-platform search");

    // Each branch owns its failure handling (a failed provider call yields
    // an empty list for that platform), so one platform cannot abort the
    // join.
    let batches = join_all(platforms.iter().map(|platform| {
        state
            .search
            .orchestrator
            .search_platform(keyword, *platform, time_range)
    }))
    .await;

    let mentions: Vec<Mention> = batches.into_iter().flatten().collect();
    let saved = persist_mentions(&state, user_id, &mentions).await?;

    let stats = build_stats(&platforms, &saved);
    Ok(Json(SearchResponseBody {
        success: true,
        data: saved,
        stats,
    }))
}

/// `GET /api/v1/search/{platform}?keyword=`
///
/// Twitter, Reddit and Facebook go through their own APIs (with mock
/// fallback); news has no direct API and routes through the site-scoped
/// orchestrator.
pub(super) async fn single_platform_search(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(platform): Path<String>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<Mention>>>, ApiError> {
    let keyword = required_keyword(query.keyword.as_deref())?;
    let time_range = parse_time_range(query.time_range.as_deref())?;

    let mentions = match parse_platform(&platform)? {
        Platform::Twitter => state.search.twitter.search(keyword).await,
        Platform::Reddit => state.search.reddit.search(keyword).await,
        Platform::Facebook => state.search.facebook.search(keyword).await,
        Platform::News => {
            state
                .search
                .orchestrator
                .search_platform(keyword, Platform::News, time_range)
                .await
        }
    };

    let saved = persist_mentions(&state, user_id, &mentions).await?;
    Ok(Json(ApiResponse::new(saved)))
}

fn required_keyword(raw: Option<&str>) -> Result<&str, ApiError> {
    match raw.map(str::trim) {
        Some(keyword) if !keyword.is_empty() => Ok(keyword),
        _ => Err(ApiError::bad_request("keyword is required")),
    }
}

fn parse_platform(name: &str) -> Result<Platform, ApiError> {
    Platform::from_str(name)
        .map_err(|_| ApiError::bad_request(format!("unsupported platform: {name}")))
}

fn parse_time_range(raw: Option<&str>) -> Result<TimeRange, ApiError> {
    match raw {
        None => Ok(TimeRange::default()),
        Some(code) => TimeRange::from_str(code)
            .map_err(|_| ApiError::bad_request(format!("invalid time range: {code}"))),
    }
}

/// Upserts every mention for the owner and returns the saved set. Rows
/// already written stay written if a later upsert fails (no transaction).
async fn persist_mentions(
    state: &AppState,
    user_id: uuid::Uuid,
    mentions: &[Mention],
) -> Result<Vec<Mention>, ApiError> {
    let mut saved = Vec::with_capacity(mentions.len());
    for mention in mentions {
        let row = brandmon_db::upsert_mention(&state.pool, user_id, mention)
            .await
            .map_err(|e| map_db_error(&e))?;
        saved.push(row.into_mention().map_err(|e| map_db_error(&e))?);
    }
    Ok(saved)
}

fn build_stats(platforms: &[Platform], saved: &[Mention]) -> SearchStats {
    let mut by_platform = serde_json::Map::new();
    for platform in platforms {
        let count = saved.iter().filter(|m| m.platform == *platform).count();
        by_platform.insert(platform.as_str().to_string(), count.into());
    }
    SearchStats {
        total: saved.len(),
        by_platform,
    }
}

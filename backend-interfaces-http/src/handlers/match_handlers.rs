use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Serialize;

use backend_application::commands::{hero_commands, link_commands, LinkSummary};
use backend_application::queries::match_queries;
use backend_application::AppState;
use backend_domain::{HeroUpdate, MatchId, MatchRecord};

use crate::error::HttpError;
use crate::middleware::{authorize, parse_account};

#[derive(Serialize)]
pub struct ThreadKey {
    thread_key: String,
}

pub async fn list_matches(
    State(state): State<AppState>,
    Path(account): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Vec<MatchRecord>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let account = parse_account(&account)?;
    let matches = match_queries::list_matches(&state, &account).await?;
    Ok(Json(matches))
}

pub async fn update_heroes(
    State(state): State<AppState>,
    Path((account, match_id)): Path<(String, String)>,
    headers: HeaderMap,
    Json(payload): Json<HeroUpdate>,
) -> Result<Json<MatchRecord>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let account = parse_account(&account)?;
    let record =
        hero_commands::update_heroes(&state, &account, &MatchId::new(match_id), payload).await?;
    Ok(Json(record))
}

pub async fn match_thread_key(
    State(state): State<AppState>,
    Path((account, match_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<ThreadKey>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let account = parse_account(&account)?;
    let key = match_queries::match_thread_key(&state, &account, &MatchId::new(match_id)).await?;
    Ok(Json(ThreadKey {
        thread_key: key.to_string(),
    }))
}

/// Synchronous link pass, for clients that want the counts.
pub async fn link_account(
    State(state): State<AppState>,
    Path(account): Path<String>,
    headers: HeaderMap,
) -> Result<Json<LinkSummary>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let account = parse_account(&account)?;
    let summary = link_commands::link_account_matches(&state, &account).await;
    Ok(Json(summary))
}

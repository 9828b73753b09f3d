use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use tracing::error;

use backend_application::commands::import_commands;
use backend_application::AppState;
use backend_domain::{ImportSummary, SingleEventImport};

use crate::error::HttpError;
use crate::middleware::{authorize, parse_account, parse_json_body, read_text_body};

pub async fn import_paste(
    State(state): State<AppState>,
    Path(account): Path<String>,
    headers: HeaderMap,
    body: axum::body::Bytes,
) -> Result<Json<ImportSummary>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let account = parse_account(&account)?;
    let text = read_body(&headers, &body)?;
    let summary = import_commands::import_paste(&state, &account, &text).await?;
    Ok(Json(summary))
}

pub async fn import_csv(
    State(state): State<AppState>,
    Path(account): Path<String>,
    headers: HeaderMap,
    body: axum::body::Bytes,
) -> Result<Json<ImportSummary>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let account = parse_account(&account)?;
    let text = read_body(&headers, &body)?;
    let summary = import_commands::import_csv(&state, &account, &text).await?;
    Ok(Json(summary))
}

pub async fn import_event(
    State(state): State<AppState>,
    Path(account): Path<String>,
    headers: HeaderMap,
    body: axum::body::Bytes,
) -> Result<Json<ImportSummary>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let account = parse_account(&account)?;
    let request: SingleEventImport = parse_json_body(&headers, &body).map_err(|err| {
        error!("failed to parse event import body: {}", err);
        HttpError::BadRequest(err.to_string())
    })?;
    let summary = import_commands::import_single_event(&state, &account, request).await?;
    Ok(Json(summary))
}

fn read_body(headers: &HeaderMap, body: &[u8]) -> Result<String, HttpError> {
    read_text_body(headers, body).map_err(|err| {
        error!("failed to read import body: {}", err);
        HttpError::BadRequest(err.to_string())
    })
}

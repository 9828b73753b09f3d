use std::io::Read;

use anyhow::{anyhow, Result};
use axum::http::HeaderMap;
use flate2::read::GzDecoder;
use serde::de::DeserializeOwned;

use backend_domain::{AccountId, RuntimeConfig};

use crate::error::HttpError;

pub fn authorize(config: &RuntimeConfig, headers: &HeaderMap) -> bool {
    if let Some(api_token) = &config.api_token {
        return extract_bearer(headers)
            .map(|v| v == *api_token)
            .unwrap_or(false);
    }
    true
}

/// Path segment to account id; anything that could not name a storage file
/// is a client error.
pub fn parse_account(raw: &str) -> Result<AccountId, HttpError> {
    AccountId::parse(raw).map_err(|err| HttpError::BadRequest(err.to_string()))
}

/// Request body as text, gunzipped when `Content-Encoding: gzip`.
pub fn read_text_body(headers: &HeaderMap, body: &[u8]) -> Result<String> {
    maybe_gunzip(headers, body)
}

pub fn parse_json_body<T: DeserializeOwned>(headers: &HeaderMap, body: &[u8]) -> Result<T> {
    let content = maybe_gunzip(headers, body)?;
    serde_json::from_str(&content).map_err(|err| anyhow!("invalid json: {}", err))
}

fn maybe_gunzip(headers: &HeaderMap, body: &[u8]) -> Result<String> {
    if let Some(encoding) = headers.get("Content-Encoding") {
        if encoding.to_str().unwrap_or("") == "gzip" {
            let mut decoder = GzDecoder::new(body);
            let mut out = String::new();
            decoder.read_to_string(&mut out)?;
            return Ok(out);
        }
    }
    Ok(String::from_utf8(body.to_vec())?)
}

fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    let value = headers.get("Authorization")?.to_str().ok()?.trim();
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}

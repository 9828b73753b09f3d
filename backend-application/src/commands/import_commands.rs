use std::collections::HashSet;

use tracing::{debug, info, warn};

use backend_domain::{
    parse_csv, parse_paste, parse_single_event, AccountId, ImportMetadata, ImportSummary,
    NewMatch, SingleEventImport,
};

use crate::AppError;
use crate::AppState;

const NO_MATCHES: &str = "no matches found";

/// Imports free-form pasted history that may span several events.
pub async fn import_paste(
    state: &AppState,
    account: &AccountId,
    text: &str,
) -> Result<ImportSummary, AppError> {
    let parsed = parse_paste(text);
    let options = state.import_options();
    let events = parsed.events.len();
    let matches: Vec<NewMatch> = parsed
        .events
        .iter()
        .flat_map(|event| event.to_new_matches(options))
        .collect();
    store_matches(state, account, matches, events, parsed.skipped, None).await
}

/// Imports a CSV export. A player id in the metadata header is registered for
/// `account` so other players' records can link back to it.
pub async fn import_csv(
    state: &AppState,
    account: &AccountId,
    text: &str,
) -> Result<ImportSummary, AppError> {
    let parsed = parse_csv(text);
    let events = parsed
        .matches
        .iter()
        .map(|new| (new.date, new.event_name.as_str()))
        .collect::<HashSet<_>>()
        .len();

    if !parsed.matches.is_empty() {
        if let Some(external_id) = parsed.metadata.external_id.as_deref() {
            if let Err(err) = state
                .account_directory
                .register_external_id(external_id, account)
                .await
            {
                warn!(
                    "failed to register external id: account={}, id={}, err={}",
                    account, external_id, err
                );
            }
        }
    }

    let metadata = Some(parsed.metadata).filter(|meta| *meta != ImportMetadata::default());
    store_matches(state, account, parsed.matches, events, parsed.skipped, metadata).await
}

/// Imports round rows for one event whose details the user typed in.
pub async fn import_single_event(
    state: &AppState,
    account: &AccountId,
    request: SingleEventImport,
) -> Result<ImportSummary, AppError> {
    let (event, skipped) = parse_single_event(&request.event, &request.rows);
    let matches = event
        .map(|event| event.to_new_matches(state.import_options()))
        .unwrap_or_default();
    let events = usize::from(!matches.is_empty());
    store_matches(state, account, matches, events, skipped, None).await
}

async fn store_matches(
    state: &AppState,
    account: &AccountId,
    matches: Vec<NewMatch>,
    events: usize,
    skipped: usize,
    metadata: Option<ImportMetadata>,
) -> Result<ImportSummary, AppError> {
    if matches.is_empty() {
        debug!("import rejected: account={}, skipped={}", account, skipped);
        return Err(AppError::BadRequest(NO_MATCHES.to_string()));
    }

    let stored = match state.match_repo.insert_matches(account, matches).await {
        Ok(stored) => stored,
        Err(err) => {
            state.metrics.record_import_error();
            return Err(AppError::Internal(err));
        }
    };

    state.metrics.record_import(stored.len(), skipped);
    info!(
        "import stored: account={}, events={}, matches={}, skipped={}",
        account,
        events,
        stored.len(),
        skipped
    );
    Ok(ImportSummary {
        events,
        matches: stored.len(),
        skipped,
        metadata,
    })
}

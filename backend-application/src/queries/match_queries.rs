use tracing::debug;

use backend_domain::{AccountId, Fingerprint, MatchId, MatchRecord};

use crate::commands::link_commands::spawn_link_pass;
use crate::AppError;
use crate::AppState;

/// Lists the account's matches. With `link_on_load`, a link pass is started in
/// the background; the listing never waits for it.
pub async fn list_matches(
    state: &AppState,
    account: &AccountId,
) -> Result<Vec<MatchRecord>, AppError> {
    let matches = state.match_repo.fetch_matches(account).await?;
    let linkable = matches
        .iter()
        .any(|record| record.opponent_external_id.is_some());
    if state.config.link_on_load && linkable {
        debug!("starting background link pass for {}", account);
        spawn_link_pass(state.clone(), account.clone());
    }
    Ok(matches)
}

/// The key both players' records of one game share.
pub async fn match_thread_key(
    state: &AppState,
    account: &AccountId,
    match_id: &MatchId,
) -> Result<Fingerprint, AppError> {
    state
        .match_repo
        .fetch_matches(account)
        .await?
        .iter()
        .find(|record| &record.id == match_id)
        .map(MatchRecord::fingerprint)
        .ok_or_else(|| AppError::NotFound(format!("match {}", match_id)))
}

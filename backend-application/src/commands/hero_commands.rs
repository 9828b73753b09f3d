use tracing::info;

use backend_domain::{AccountId, HeroUpdate, MatchId, MatchRecord};

use crate::commands::link_commands::spawn_single_link;
use crate::AppError;
use crate::AppState;

/// Applies a manual hero edit, then links the edited record in the background.
pub async fn update_heroes(
    state: &AppState,
    account: &AccountId,
    match_id: &MatchId,
    update: HeroUpdate,
) -> Result<MatchRecord, AppError> {
    let update = update.normalized();
    if update.is_empty() {
        return Err(AppError::BadRequest(
            "hero_played or opponent_hero is required".to_string(),
        ));
    }

    let record = state
        .match_repo
        .update_heroes(
            account,
            match_id,
            update.hero_played.as_deref(),
            update.opponent_hero.as_deref(),
        )
        .await?
        .ok_or_else(|| AppError::NotFound(format!("match {}", match_id)))?;

    info!("heroes updated: account={}, match={}", account, match_id);
    spawn_single_link(state.clone(), account.clone(), match_id.clone());
    Ok(record)
}

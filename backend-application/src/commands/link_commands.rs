// Cross-player linking: pair a user's matches with the opponent's own records
// of the same games and exchange hero fields in both directions.
//
// Best effort throughout. Every collaborator failure ends the smallest unit of
// work it belongs to and is logged; nothing escapes to the caller.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info, warn};

use backend_domain::{is_known_hero, AccountId, FingerprintIndex, MatchId, MatchRecord};

use crate::AppState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LinkSummary {
    pub links: usize,
    pub heroes_received: usize,
    pub heroes_shared: usize,
}

/// Full pass over every match of `account` that names an opponent external id.
pub async fn link_account_matches(state: &AppState, account: &AccountId) -> LinkSummary {
    let matches = match state.match_repo.fetch_matches(account).await {
        Ok(matches) => matches,
        Err(err) => {
            warn!("link pass skipped: account={}, err={}", account, err);
            return LinkSummary::default();
        }
    };
    let summary = link_matches(state, account, &matches).await;
    state.metrics.record_link_pass(&summary);
    info!(
        "link pass finished: account={}, links={}, received={}, shared={}",
        account, summary.links, summary.heroes_received, summary.heroes_shared
    );
    summary
}

/// Narrow form used right after a hero edit: only the edited record exchanges
/// heroes, but its opponent group is still claimed in stored order so
/// rematches pair the same way a full pass would.
pub async fn link_single_match(state: &AppState, account: &AccountId, match_id: &MatchId) -> LinkSummary {
    let matches = match state.match_repo.fetch_matches(account).await {
        Ok(matches) => matches,
        Err(err) => {
            warn!("single link skipped: account={}, match={}, err={}", account, match_id, err);
            return LinkSummary::default();
        }
    };
    let Some(record) = matches.iter().find(|record| &record.id == match_id) else {
        debug!("single link skipped: match {} not found for {}", match_id, account);
        return LinkSummary::default();
    };
    let Some(external_id) = opponent_key(record) else {
        return LinkSummary::default();
    };
    let group: Vec<&MatchRecord> = matches
        .iter()
        .filter(|candidate| opponent_key(candidate) == Some(external_id))
        .collect();

    let mut summary = LinkSummary::default();
    link_group(state, account, external_id, &group, Some(match_id), &mut summary).await;
    state.metrics.record_link_pass(&summary);
    summary
}

/// Fire-and-forget full pass. Never blocks the caller.
pub fn spawn_link_pass(state: AppState, account: AccountId) {
    tokio::spawn(async move {
        link_account_matches(&state, &account).await;
    });
}

pub fn spawn_single_link(state: AppState, account: AccountId, match_id: MatchId) {
    tokio::spawn(async move {
        link_single_match(&state, &account, &match_id).await;
    });
}

async fn link_matches(state: &AppState, account: &AccountId, matches: &[MatchRecord]) -> LinkSummary {
    let mut groups: BTreeMap<&str, Vec<&MatchRecord>> = BTreeMap::new();
    for record in matches {
        if let Some(external_id) = opponent_key(record) {
            groups.entry(external_id).or_default().push(record);
        }
    }

    let mut summary = LinkSummary::default();
    for (external_id, group) in groups {
        link_group(state, account, external_id, &group, None, &mut summary).await;
    }
    summary
}

fn opponent_key(record: &MatchRecord) -> Option<&str> {
    record
        .opponent_external_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
}

async fn link_group(
    state: &AppState,
    account: &AccountId,
    external_id: &str,
    group: &[&MatchRecord],
    target: Option<&MatchId>,
    summary: &mut LinkSummary,
) {
    let opponent = match state.account_directory.resolve_external_id(external_id).await {
        Ok(Some(opponent)) => opponent,
        Ok(None) => {
            debug!("no account for external id {}", external_id);
            return;
        }
        Err(err) => {
            warn!("external id lookup failed: id={}, err={}", external_id, err);
            return;
        }
    };
    if &opponent == account {
        debug!("external id {} resolves to the linking account itself", external_id);
        return;
    }

    let opponent_matches = match state.match_repo.fetch_matches(&opponent).await {
        Ok(matches) => matches,
        Err(err) => {
            warn!("opponent fetch failed: account={}, err={}", opponent, err);
            return;
        }
    };
    let mut index = FingerprintIndex::build(opponent_matches);

    for record in group {
        let Some(counterpart) = index.claim_opposite(&record.fingerprint(), record.result) else {
            continue;
        };
        // earlier records still consume their counterparts
        if target.is_some_and(|id| id != &record.id) {
            continue;
        }
        summary.links += 1;

        if is_known_hero(&record.hero_played) && !is_known_hero(&counterpart.opponent_hero) {
            match state
                .match_repo
                .set_opponent_hero(&opponent, &counterpart.id, &record.hero_played)
                .await
            {
                Ok(true) => summary.heroes_shared += 1,
                Ok(false) => {}
                Err(err) => warn!(
                    "sharing hero failed: account={}, match={}, err={}",
                    opponent, counterpart.id, err
                ),
            }
        }

        if is_known_hero(&counterpart.hero_played) && !is_known_hero(&record.opponent_hero) {
            match state
                .match_repo
                .set_opponent_hero(account, &record.id, &counterpart.hero_played)
                .await
            {
                Ok(true) => summary.heroes_received += 1,
                Ok(false) => {}
                Err(err) => warn!(
                    "receiving hero failed: account={}, match={}, err={}",
                    account, record.id, err
                ),
            }
        }
    }
}

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::Mutex;

use backend_domain::{
    is_known_hero, unknown_hero, AccountDirectory, AccountId, EventType, GameFormat, MatchId,
    MatchRecord, MatchRepository, MatchResult, NewMatch, RuntimeConfig,
};

use crate::{AppState, Metrics};

/// In-memory stand-in for both ports, with switches to make calls fail.
#[derive(Default)]
pub struct MemoryStore {
    matches: Mutex<HashMap<AccountId, Vec<MatchRecord>>>,
    external_ids: Mutex<HashMap<String, AccountId>>,
    failing_fetches: Mutex<HashSet<AccountId>>,
    denied_writes: Mutex<HashSet<AccountId>>,
    failing_lookups: Mutex<HashSet<String>>,
    next_id: AtomicU64,
}

impl MemoryStore {
    pub async fn seed(&self, account: &str, matches: Vec<NewMatch>) -> Vec<MatchRecord> {
        self.insert_matches(&AccountId::new(account), matches)
            .await
            .expect("seed matches")
    }

    pub async fn link_external_id(&self, external_id: &str, account: &str) {
        self.external_ids
            .lock()
            .await
            .insert(external_id.to_string(), AccountId::new(account));
    }

    pub async fn fail_fetches_for(&self, account: &str) {
        self.failing_fetches.lock().await.insert(AccountId::new(account));
    }

    pub async fn deny_writes_for(&self, account: &str) {
        self.denied_writes.lock().await.insert(AccountId::new(account));
    }

    pub async fn fail_lookup_of(&self, external_id: &str) {
        self.failing_lookups.lock().await.insert(external_id.to_string());
    }

    pub async fn record(&self, account: &str, match_id: &MatchId) -> MatchRecord {
        self.matches
            .lock()
            .await
            .get(&AccountId::new(account))
            .and_then(|rows| rows.iter().find(|row| &row.id == match_id).cloned())
            .expect("stored record")
    }
}

#[async_trait]
impl MatchRepository for MemoryStore {
    async fn insert_matches(
        &self,
        account: &AccountId,
        matches: Vec<NewMatch>,
    ) -> anyhow::Result<Vec<MatchRecord>> {
        let records: Vec<MatchRecord> = matches
            .into_iter()
            .map(|new| {
                let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                MatchRecord::from_new(MatchId::new(format!("{}-{}", account, id)), new)
            })
            .collect();
        self.matches
            .lock()
            .await
            .entry(account.clone())
            .or_default()
            .extend(records.iter().cloned());
        Ok(records)
    }

    async fn fetch_matches(&self, account: &AccountId) -> anyhow::Result<Vec<MatchRecord>> {
        if self.failing_fetches.lock().await.contains(account) {
            return Err(anyhow!("fetch failed for {}", account));
        }
        Ok(self
            .matches
            .lock()
            .await
            .get(account)
            .cloned()
            .unwrap_or_default())
    }

    async fn update_heroes(
        &self,
        account: &AccountId,
        match_id: &MatchId,
        hero_played: Option<&str>,
        opponent_hero: Option<&str>,
    ) -> anyhow::Result<Option<MatchRecord>> {
        let mut matches = self.matches.lock().await;
        let Some(record) = matches
            .get_mut(account)
            .and_then(|rows| rows.iter_mut().find(|row| &row.id == match_id))
        else {
            return Ok(None);
        };
        if let Some(hero) = hero_played {
            record.hero_played = hero.to_string();
        }
        if let Some(hero) = opponent_hero {
            record.opponent_hero = hero.to_string();
        }
        Ok(Some(record.clone()))
    }

    async fn set_opponent_hero(
        &self,
        account: &AccountId,
        match_id: &MatchId,
        hero: &str,
    ) -> anyhow::Result<bool> {
        if self.denied_writes.lock().await.contains(account) {
            return Err(anyhow!("permission denied for {}", account));
        }
        let mut matches = self.matches.lock().await;
        let record = matches
            .get_mut(account)
            .and_then(|rows| rows.iter_mut().find(|row| &row.id == match_id))
            .ok_or_else(|| anyhow!("match {} not found", match_id))?;
        if is_known_hero(&record.opponent_hero) {
            return Ok(false);
        }
        record.opponent_hero = hero.to_string();
        Ok(true)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

#[async_trait]
impl AccountDirectory for MemoryStore {
    async fn resolve_external_id(&self, external_id: &str) -> anyhow::Result<Option<AccountId>> {
        if self.failing_lookups.lock().await.contains(external_id) {
            return Err(anyhow!("lookup failed for {}", external_id));
        }
        Ok(self.external_ids.lock().await.get(external_id).cloned())
    }

    async fn register_external_id(&self, external_id: &str, account: &AccountId) -> anyhow::Result<()> {
        self.external_ids
            .lock()
            .await
            .insert(external_id.to_string(), account.clone());
        Ok(())
    }
}

pub fn state_with(store: Arc<MemoryStore>) -> AppState {
    AppState {
        config: RuntimeConfig {
            link_on_load: false,
            ..RuntimeConfig::default()
        },
        match_repo: store.clone(),
        account_directory: store,
        metrics: Arc::new(Metrics::default()),
    }
}

/// A Calling: Denver match on 2026-02-14 in the given round.
pub fn denver_match(
    round: u32,
    result: MatchResult,
    hero_played: Option<&str>,
    opponent_external_id: Option<&str>,
) -> NewMatch {
    NewMatch {
        date: NaiveDate::from_ymd_opt(2026, 2, 14).expect("date"),
        event_name: "Calling: Denver".to_string(),
        round_label: format!("Round {}", round),
        rating_delta: None,
        hero_played: hero_played.map(ToString::to_string).unwrap_or_else(unknown_hero),
        opponent_hero: unknown_hero(),
        opponent_name: "Opponent".to_string(),
        opponent_external_id: opponent_external_id.map(ToString::to_string),
        result,
        format: GameFormat::Other,
        event_type: EventType::Calling,
        venue: None,
        rated: true,
    }
}

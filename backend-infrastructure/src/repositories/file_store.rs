use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use backend_domain::{
    is_known_hero, AccountDirectory, AccountId, MatchId, MatchRecord, MatchRepository, NewMatch,
};

const MATCHES_DIR: &str = "matches";
const EXTERNAL_IDS_FILE: &str = "external_ids.json";

/// JSON files under `data_dir`: `matches/<account>.json` per account plus one
/// `external_ids.json` index. Writes are serialized through one lock and land
/// via rename so readers never see a half-written file.
pub struct FileMatchStore {
    root: PathBuf,
    write_lock: Mutex<()>,
}

impl FileMatchStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            root: data_dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub async fn ensure_layout(&self) -> Result<()> {
        fs::create_dir_all(self.root.join(MATCHES_DIR))
            .await
            .with_context(|| format!("creating {}", self.root.display()))?;
        Ok(())
    }

    fn matches_path(&self, account: &AccountId) -> Result<PathBuf> {
        let account = AccountId::parse(account.as_str())?;
        Ok(self
            .root
            .join(MATCHES_DIR)
            .join(format!("{}.json", account.as_str())))
    }

    fn external_ids_path(&self) -> PathBuf {
        self.root.join(EXTERNAL_IDS_FILE)
    }

    async fn load_matches(&self, account: &AccountId) -> Result<Vec<MatchRecord>> {
        let path = self.matches_path(account)?;
        let mut records: Vec<MatchRecord> = read_json(&path).await?.unwrap_or_default();
        for record in &mut records {
            record.backfill_from_notes();
        }
        Ok(records)
    }

    async fn save_matches(&self, account: &AccountId, records: &[MatchRecord]) -> Result<()> {
        let path = self.matches_path(account)?;
        write_json(&path, records).await
    }

    async fn load_external_ids(&self) -> Result<BTreeMap<String, AccountId>> {
        Ok(read_json(&self.external_ids_path()).await?.unwrap_or_default())
    }
}

#[async_trait]
impl MatchRepository for FileMatchStore {
    async fn insert_matches(
        &self,
        account: &AccountId,
        matches: Vec<NewMatch>,
    ) -> anyhow::Result<Vec<MatchRecord>> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load_matches(account).await?;
        let inserted: Vec<MatchRecord> = matches
            .into_iter()
            .map(|new| MatchRecord::from_new(MatchId::new(Uuid::new_v4().to_string()), new))
            .collect();
        records.extend(inserted.iter().cloned());
        self.save_matches(account, &records).await?;
        debug!("stored {} matches for {}", inserted.len(), account);
        Ok(inserted)
    }

    async fn fetch_matches(&self, account: &AccountId) -> anyhow::Result<Vec<MatchRecord>> {
        self.load_matches(account).await
    }

    async fn update_heroes(
        &self,
        account: &AccountId,
        match_id: &MatchId,
        hero_played: Option<&str>,
        opponent_hero: Option<&str>,
    ) -> anyhow::Result<Option<MatchRecord>> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load_matches(account).await?;
        let Some(record) = records.iter_mut().find(|record| &record.id == match_id) else {
            return Ok(None);
        };
        if let Some(hero) = hero_played {
            record.hero_played = hero.to_string();
        }
        if let Some(hero) = opponent_hero {
            record.opponent_hero = hero.to_string();
        }
        let updated = record.clone();
        self.save_matches(account, &records).await?;
        Ok(Some(updated))
    }

    async fn set_opponent_hero(
        &self,
        account: &AccountId,
        match_id: &MatchId,
        hero: &str,
    ) -> anyhow::Result<bool> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load_matches(account).await?;
        let record = records
            .iter_mut()
            .find(|record| &record.id == match_id)
            .ok_or_else(|| anyhow!("match {} not found for {}", match_id, account))?;
        if is_known_hero(&record.opponent_hero) {
            return Ok(false);
        }
        record.opponent_hero = hero.to_string();
        self.save_matches(account, &records).await?;
        Ok(true)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        let metadata = fs::metadata(&self.root)
            .await
            .with_context(|| format!("data dir {} unavailable", self.root.display()))?;
        if !metadata.is_dir() {
            return Err(anyhow!("data dir {} is not a directory", self.root.display()));
        }
        Ok(())
    }
}

#[async_trait]
impl AccountDirectory for FileMatchStore {
    async fn resolve_external_id(&self, external_id: &str) -> anyhow::Result<Option<AccountId>> {
        let index = self.load_external_ids().await?;
        Ok(index.get(external_id.trim()).cloned())
    }

    async fn register_external_id(&self, external_id: &str, account: &AccountId) -> anyhow::Result<()> {
        let external_id = external_id.trim();
        if external_id.is_empty() {
            return Err(anyhow!("external id is empty"));
        }
        let account = AccountId::parse(account.as_str())?;
        let _guard = self.write_lock.lock().await;
        let mut index = self.load_external_ids().await?;
        if index.get(external_id) == Some(&account) {
            return Ok(());
        }
        index.insert(external_id.to_string(), account);
        write_json(&self.external_ids_path(), &index).await
    }
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(anyhow!("reading {}: {}", path.display(), err)),
    };
    let value = serde_json::from_str(&content)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(Some(value))
}

async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }
    let content = serde_json::to_string_pretty(value)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, content).await?;
    fs::rename(&tmp, path).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use backend_domain::{unknown_hero, EventType, GameFormat, MatchResult};

    use super::*;

    fn new_match(round: u32, result: MatchResult) -> NewMatch {
        NewMatch {
            date: NaiveDate::from_ymd_opt(2026, 2, 14).unwrap(),
            event_name: "Calling: Denver".to_string(),
            round_label: format!("Round {}", round),
            rating_delta: Some("+12".to_string()),
            hero_played: unknown_hero(),
            opponent_hero: unknown_hero(),
            opponent_name: "Jane Doe".to_string(),
            opponent_external_id: Some("12345".to_string()),
            result,
            format: GameFormat::ClassicConstructed,
            event_type: EventType::Calling,
            venue: None,
            rated: true,
        }
    }

    #[tokio::test]
    async fn inserted_matches_survive_a_new_store() {
        let dir = tempfile::tempdir().unwrap();
        let account = AccountId::new("alice");
        let store = FileMatchStore::new(dir.path());
        store.ensure_layout().await.unwrap();
        store.ping().await.unwrap();

        let inserted = store
            .insert_matches(&account, vec![new_match(1, MatchResult::Win), new_match(2, MatchResult::Loss)])
            .await
            .unwrap();
        assert_ne!(inserted[0].id, inserted[1].id);

        let reopened = FileMatchStore::new(dir.path());
        let fetched = reopened.fetch_matches(&account).await.unwrap();
        assert_eq!(fetched, inserted);
    }

    #[tokio::test]
    async fn unknown_account_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileMatchStore::new(dir.path());
        assert!(store.fetch_matches(&AccountId::new("nobody")).await.unwrap().is_empty());
        assert!(store.fetch_matches(&AccountId::new("../escape")).await.is_err());
    }

    #[tokio::test]
    async fn opponent_hero_is_written_only_once() {
        let dir = tempfile::tempdir().unwrap();
        let account = AccountId::new("alice");
        let store = FileMatchStore::new(dir.path());
        let inserted = store
            .insert_matches(&account, vec![new_match(1, MatchResult::Win)])
            .await
            .unwrap();
        let id = &inserted[0].id;

        assert!(store.set_opponent_hero(&account, id, "Bravo").await.unwrap());
        assert!(!store.set_opponent_hero(&account, id, "Katsu").await.unwrap());
        assert!(store
            .set_opponent_hero(&account, &MatchId::new("missing"), "Katsu")
            .await
            .is_err());

        let fetched = store.fetch_matches(&account).await.unwrap();
        assert_eq!(fetched[0].opponent_hero, "Bravo");
    }

    #[tokio::test]
    async fn hero_edits_leave_untouched_fields_alone() {
        let dir = tempfile::tempdir().unwrap();
        let account = AccountId::new("alice");
        let store = FileMatchStore::new(dir.path());
        let inserted = store
            .insert_matches(&account, vec![new_match(1, MatchResult::Win)])
            .await
            .unwrap();

        let updated = store
            .update_heroes(&account, &inserted[0].id, Some("Dorinthea"), None)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.hero_played, "Dorinthea");
        assert_eq!(updated.opponent_hero, "Unknown");
        assert!(store
            .update_heroes(&account, &MatchId::new("missing"), Some("Katsu"), None)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn legacy_notes_are_backfilled_on_read() {
        let dir = tempfile::tempdir().unwrap();
        let matches_dir = dir.path().join(MATCHES_DIR);
        std::fs::create_dir_all(&matches_dir).unwrap();
        std::fs::write(
            matches_dir.join("legacy.json"),
            r#"[{"id":"m1","date":"2026-02-14","opponent_name":"Jane Doe","result":"Win","format":"ClassicConstructed","event_type":"Calling","notes":"Calling: Denver | Round 2 | Rating +12"}]"#,
        )
        .unwrap();

        let store = FileMatchStore::new(dir.path());
        let fetched = store.fetch_matches(&AccountId::new("legacy")).await.unwrap();

        assert_eq!(fetched[0].event_name, "Calling: Denver");
        assert_eq!(fetched[0].round_label, "Round 2");
        assert_eq!(fetched[0].rating_delta.as_deref(), Some("+12"));
        assert_eq!(fetched[0].fingerprint().as_str(), "2026-02-14|calling: denver|round 2");
    }

    #[tokio::test]
    async fn external_ids_resolve_after_registration() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileMatchStore::new(dir.path());
        let bob = AccountId::new("bob");

        assert!(store.resolve_external_id("2002").await.unwrap().is_none());
        store.register_external_id(" 2002 ", &bob).await.unwrap();
        assert_eq!(store.resolve_external_id("2002").await.unwrap(), Some(bob));
        assert!(store.register_external_id("", &AccountId::new("bob")).await.is_err());
    }
}

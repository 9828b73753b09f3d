use async_trait::async_trait;

use crate::entities::{MatchRecord, NewMatch};
use crate::value_objects::{AccountId, MatchId};

/// Storage of match records under an account.
#[async_trait]
pub trait MatchRepository: Send + Sync {
    /// Assigns identities and appends the matches to the account's history.
    async fn insert_matches(
        &self,
        account: &AccountId,
        matches: Vec<NewMatch>,
    ) -> anyhow::Result<Vec<MatchRecord>>;

    async fn fetch_matches(&self, account: &AccountId) -> anyhow::Result<Vec<MatchRecord>>;

    /// Owner edit of the hero fields. `None` leaves a field untouched.
    async fn update_heroes(
        &self,
        account: &AccountId,
        match_id: &MatchId,
        hero_played: Option<&str>,
        opponent_hero: Option<&str>,
    ) -> anyhow::Result<Option<MatchRecord>>;

    /// Writes `hero` into the record's opponent hero only while that field is
    /// still unknown. Returns whether anything was written.
    async fn set_opponent_hero(
        &self,
        account: &AccountId,
        match_id: &MatchId,
        hero: &str,
    ) -> anyhow::Result<bool>;

    async fn ping(&self) -> anyhow::Result<()>;
}

use async_trait::async_trait;

use crate::value_objects::AccountId;

/// Index from an originating-platform player id to a local account.
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    async fn resolve_external_id(&self, external_id: &str) -> anyhow::Result<Option<AccountId>>;
    async fn register_external_id(&self, external_id: &str, account: &AccountId) -> anyhow::Result<()>;
}

// Identifier value objects

use std::fmt;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

const MAX_ACCOUNT_ID_LEN: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub String);

impl AccountId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Checked constructor for ids arriving from outside. Account ids name
    /// storage files, so only `[A-Za-z0-9_-]` is accepted.
    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(anyhow!("account id is empty"));
        }
        if trimmed.len() > MAX_ACCOUNT_ID_LEN {
            return Err(anyhow!("account id longer than {} characters", MAX_ACCOUNT_ID_LEN));
        }
        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(anyhow!("account id '{}' has invalid characters", trimmed));
        }
        Ok(Self::new(trimmed))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(pub String);

impl MatchId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_plain_ids() {
        assert_eq!(AccountId::parse(" alice_01 ").unwrap().as_str(), "alice_01");
        assert!(AccountId::parse("bob-2").is_ok());
    }

    #[test]
    fn parse_rejects_path_like_ids() {
        assert!(AccountId::parse("").is_err());
        assert!(AccountId::parse("../etc").is_err());
        assert!(AccountId::parse("a/b").is_err());
        assert!(AccountId::parse(&"x".repeat(65)).is_err());
    }
}

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use backend_domain::RuntimeConfig;

pub const CONFIG_ENV: &str = "MATCHBOOK_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "./config.toml";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    pub data_dir: String,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
    pub link_on_load: bool,
    pub capture_paste_external_ids: bool,
    pub log_dir: Option<String>,
    pub log_json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        let runtime = RuntimeConfig::default();
        Self {
            bind_addr: runtime.bind_addr,
            api_token: None,
            data_dir: runtime.data_dir,
            max_body_bytes: runtime.max_body_bytes,
            request_timeout_seconds: runtime.request_timeout_seconds,
            link_on_load: runtime.link_on_load,
            capture_paste_external_ids: runtime.capture_paste_external_ids,
            log_dir: None,
            log_json: false,
        }
    }
}

impl AppConfig {
    /// Loads from `MATCHBOOK_CONFIG`, falling back to `./config.toml`.
    pub async fn load() -> Result<Self> {
        Self::load_from(None).await
    }

    /// An explicit path wins over the environment.
    pub async fn load_from(path: Option<PathBuf>) -> Result<Self> {
        let path = path.unwrap_or_else(|| {
            PathBuf::from(env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string()))
        });
        let base_dir = path.parent();
        let mut config = if path.exists() {
            let content = fs::read_to_string(&path).await?;
            Self::parse(&content)?
        } else {
            warn!("{} not found, using defaults", path.display());
            AppConfig::default()
        };
        config.apply_env_overrides();
        config.resolve_paths(base_dir);
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|err| anyhow!("invalid config: {}", err))
    }

    pub fn normalize(&mut self) {
        self.api_token = blank_to_none(self.api_token.take());
        self.log_dir = blank_to_none(self.log_dir.take());
        self.data_dir = self.data_dir.trim().to_string();
    }

    fn resolve_paths(&mut self, base_dir: Option<&Path>) {
        let Some(base) = base_dir else {
            return;
        };
        self.data_dir = resolve_path(base, &self.data_dir);
        if let Some(log_dir) = &self.log_dir {
            self.log_dir = Some(resolve_path(base, log_dir));
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.bind_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|err| anyhow!("invalid bind_addr: {}", err))?;
        if self.data_dir.is_empty() {
            return Err(anyhow!("data_dir must not be empty"));
        }
        if self.max_body_bytes == 0 {
            return Err(anyhow!("max_body_bytes must be greater than 0"));
        }
        if self.request_timeout_seconds == 0 {
            return Err(anyhow!("request_timeout_seconds must be greater than 0"));
        }
        Ok(())
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            api_token: self.api_token.clone(),
            data_dir: self.data_dir.clone(),
            max_body_bytes: self.max_body_bytes,
            request_timeout_seconds: self.request_timeout_seconds,
            link_on_load: self.link_on_load,
            capture_paste_external_ids: self.capture_paste_external_ids,
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var("MATCHBOOK_BIND_ADDR") {
            self.bind_addr = value;
        }
        if let Ok(value) = env::var("MATCHBOOK_API_TOKEN") {
            self.api_token = Some(value);
        }
        if let Ok(value) = env::var("MATCHBOOK_DATA_DIR") {
            self.data_dir = value;
        }
        if let Ok(value) = env::var("MATCHBOOK_MAX_BODY_BYTES") {
            self.max_body_bytes = value.parse().unwrap_or(self.max_body_bytes);
        }
        if let Ok(value) = env::var("MATCHBOOK_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = value.parse().unwrap_or(self.request_timeout_seconds);
        }
        if let Ok(value) = env::var("MATCHBOOK_LINK_ON_LOAD") {
            self.link_on_load = value.parse().unwrap_or(self.link_on_load);
        }
        if let Ok(value) = env::var("MATCHBOOK_CAPTURE_PASTE_EXTERNAL_IDS") {
            self.capture_paste_external_ids =
                value.parse().unwrap_or(self.capture_paste_external_ids);
        }
        if let Ok(value) = env::var("MATCHBOOK_LOG_DIR") {
            self.log_dir = Some(value);
        }
        if let Ok(value) = env::var("MATCHBOOK_LOG_JSON") {
            self.log_json = value.parse().unwrap_or(self.log_json);
        }
    }
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}

fn resolve_path(base: &Path, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return trimmed.to_string();
    }
    let path = Path::new(trimmed);
    if path.is_absolute() {
        trimmed.to_string()
    } else {
        base.join(path).to_string_lossy().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = AppConfig::parse("bind_addr = \"0.0.0.0:8080\"\nlink_on_load = false\n").unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert!(!config.link_on_load);
        assert!(!config.capture_paste_external_ids);
        assert_eq!(config.max_body_bytes, 4 * 1024 * 1024);
    }

    #[test]
    fn blank_optionals_normalize_to_none() {
        let mut config = AppConfig::parse("api_token = \"  \"\nlog_dir = \"\"\n").unwrap();
        config.normalize();
        assert!(config.api_token.is_none());
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn relative_paths_follow_the_config_file() {
        let mut config = AppConfig::parse("data_dir = \"store\"\nlog_dir = \"/var/log/matchbook\"\n").unwrap();
        config.resolve_paths(Some(Path::new("/etc/matchbook")));
        assert_eq!(config.data_dir, "/etc/matchbook/store");
        assert_eq!(config.log_dir.as_deref(), Some("/var/log/matchbook"));
    }

    #[test]
    fn validation_rejects_bad_values() {
        let mut config = AppConfig::default();
        assert!(config.validate().is_ok());
        config.bind_addr = "not an address".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.request_timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[tokio::test]
    async fn load_reads_an_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "data_dir = \"data\"\ncapture_paste_external_ids = true\n").unwrap();

        let config = AppConfig::load_from(Some(path)).await.unwrap();

        assert!(config.capture_paste_external_ids);
        assert_eq!(
            PathBuf::from(&config.data_dir),
            dir.path().join("data")
        );
        assert!(config.to_runtime_config().capture_paste_external_ids);
    }
}

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use backend_application::{AppState, Metrics};
use backend_infrastructure::{AppConfig, FileMatchStore};

pub struct AppContext {
    pub state: AppState,
}

impl AppContext {
    pub async fn new(config: &AppConfig) -> Result<Self> {
        let runtime_config = config.to_runtime_config();

        let store = Arc::new(FileMatchStore::new(&runtime_config.data_dir));
        store.ensure_layout().await?;
        info!(
            data_dir = %runtime_config.data_dir,
            link_on_load = runtime_config.link_on_load,
            capture_paste_external_ids = runtime_config.capture_paste_external_ids,
            api_token_set = runtime_config.api_token.is_some(),
            "config loaded"
        );

        let state = AppState {
            config: runtime_config,
            match_repo: store.clone(),
            account_directory: store,
            metrics: Arc::new(Metrics::default()),
        };

        Ok(Self { state })
    }
}

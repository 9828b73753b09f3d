use std::sync::Arc;

use backend_domain::ports::{AccountDirectory, MatchRepository};
use backend_domain::{ImportOptions, RuntimeConfig};

use crate::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub match_repo: Arc<dyn MatchRepository>,
    pub account_directory: Arc<dyn AccountDirectory>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn import_options(&self) -> ImportOptions {
        ImportOptions {
            capture_paste_external_ids: self.config.capture_paste_external_ids,
        }
    }
}

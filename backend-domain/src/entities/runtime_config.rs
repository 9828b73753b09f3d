#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    pub data_dir: String,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
    pub link_on_load: bool,
    pub capture_paste_external_ids: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3240".to_string(),
            api_token: None,
            data_dir: "./data".to_string(),
            max_body_bytes: 4 * 1024 * 1024,
            request_timeout_seconds: 15,
            link_on_load: true,
            capture_paste_external_ids: false,
        }
    }
}

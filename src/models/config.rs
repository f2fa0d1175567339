//! Configuration model loaded from external sources.

use serde::Deserialize;

use crate::domain::upload::MAX_UPLOAD_BYTES;

fn default_cache_ttl_secs() -> u64 {
    5
}

fn default_upload_max_bytes() -> u64 {
    MAX_UPLOAD_BYTES
}

#[derive(Clone, Debug, Deserialize)]
/// Settings shared across handlers.
pub struct ServerConfig {
    pub domain: String,
    pub address: String,
    pub port: u16,
    pub templates_dir: String,
    /// Signs session cookies, flash messages and the identity token.
    pub secret: String,
    /// Base URL of the remote travel API, e.g. `https://api.example.com/api/v1`.
    pub api_base_url: String,
    pub api_key: String,
    /// Staleness window of cached catalog lists.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    #[serde(default = "default_upload_max_bytes")]
    pub upload_max_bytes: u64,
}

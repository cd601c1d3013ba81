//! Remote chat service connection settings.

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://chatbotbackend-4ve7.onrender.com";

/// Where the chat service lives and who we are on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base URL, without trailing slash (one is stripped if present).
    pub base_url: String,
    pub user_id: i64,
    /// TCP connect timeout in seconds (valid range: 1-300).
    pub connect_timeout_secs: u32,
    /// Whole-request timeout in seconds (valid range: 1-3600).
    pub request_timeout_secs: u32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            user_id: 1234,
            connect_timeout_secs: 10,
            request_timeout_secs: 60,
        }
    }
}

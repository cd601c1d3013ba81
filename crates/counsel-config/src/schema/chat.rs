//! Chat behaviour settings.

use serde::{Deserialize, Serialize};

/// Paging and session defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Messages per page (valid range: 1-200).
    pub page_size: u32,
    /// Title used when a new session is started without one.
    pub default_session_title: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            default_session_title: "New session".into(),
        }
    }
}

//! Environment variable overrides applied on top of the loaded file.

use crate::schema::CounselConfig;
use tracing::{info, warn};

pub const API_URL_VAR: &str = "COUNSEL_API_URL";
pub const USER_ID_VAR: &str = "COUNSEL_USER_ID";

/// Apply `COUNSEL_API_URL` / `COUNSEL_USER_ID` from the process environment.
pub fn apply_env_overrides(config: &mut CounselConfig) {
    apply_overrides(config, |key| std::env::var(key).ok());
}

/// Apply overrides from an arbitrary lookup. Unparseable values are ignored
/// with a warning.
pub fn apply_overrides(config: &mut CounselConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(url) = lookup(API_URL_VAR).filter(|v| !v.trim().is_empty()) {
        info!("{API_URL_VAR} overrides service.base_url");
        config.service.base_url = url.trim().to_string();
    }

    if let Some(raw) = lookup(USER_ID_VAR) {
        match raw.trim().parse::<i64>() {
            Ok(user_id) => {
                info!("{USER_ID_VAR} overrides service.user_id");
                config.service.user_id = user_id;
            }
            Err(e) => warn!("ignoring {USER_ID_VAR}={raw:?}: {e}"),
        }
    }
}

//! counsel configuration.
//!
//! TOML-based configuration with environment overrides and full
//! validation. All sections use defaults so partial configs work out of
//! the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use counsel_config::load_config;
//!
//! let config = load_config(None).expect("failed to load config");
//! println!("{}", config.service.base_url);
//! ```

pub mod env;
pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{CounselConfig, CONFIG_SCHEMA_VERSION};

use counsel_common::ConfigError;
use std::path::Path;
use tracing::warn;

/// Load, override and validate the config.
///
/// With `path` set, that file must exist. Without it, the platform default
/// is used and created from the template when missing. Environment
/// overrides are applied before validation.
pub fn load_config(path: Option<&Path>) -> Result<CounselConfig, ConfigError> {
    let mut config = match path {
        Some(path) => toml_loader::load_from_path(path)?,
        None => toml_loader::load_default()?,
    };

    env::apply_env_overrides(&mut config);
    config.service.base_url = config.service.base_url.trim_end_matches('/').to_string();

    validation::validate(&config)?;
    Ok(config)
}

/// Defaults plus environment overrides, for when the file cannot be used.
///
/// Overrides that would not validate are dropped with a warning.
pub fn fallback_config() -> CounselConfig {
    fallback_with(|key| std::env::var(key).ok())
}

fn fallback_with(lookup: impl Fn(&str) -> Option<String>) -> CounselConfig {
    let mut config = CounselConfig::default();
    env::apply_overrides(&mut config, lookup);
    config.service.base_url = config.service.base_url.trim_end_matches('/').to_string();

    match validation::validate(&config) {
        Ok(()) => config,
        Err(e) => {
            warn!("ignoring environment overrides: {e}");
            CounselConfig::default()
        }
    }
}

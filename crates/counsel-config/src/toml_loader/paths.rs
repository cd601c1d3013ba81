//! Where the config file lives, and writing the starter file.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use counsel_common::ConfigError;
use tracing::info;

use super::template::default_config_toml;

const APP_DIR: &str = "counsel";
const CONFIG_FILE: &str = "config.toml";

/// `<platform config dir>/counsel/config.toml`.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
        .ok_or_else(|| ConfigError::ParseError("could not determine config directory".into()))
}

/// Write the commented starter config to `path`. An existing file is
/// never overwritten.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    let write_error =
        |e: std::io::Error| ConfigError::ParseError(format!("cannot write {}: {e}", path.display()));

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(write_error)?;
    file.write_all(default_config_toml().as_bytes())
        .map_err(write_error)?;

    info!("wrote starter config to {}", path.display());
    Ok(())
}

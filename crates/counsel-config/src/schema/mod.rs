//! Configuration schema types for counsel.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod chat;
mod service;
mod system;

pub use chat::*;
pub use service::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct CounselConfig {
    pub service: ServiceConfig,
    pub chat: ChatConfig,
    pub logging: LoggingConfig,
}

// =============================================================================
// Tests
// =============================================================================

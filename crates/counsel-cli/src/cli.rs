use std::path::PathBuf;

use clap::Parser;
use counsel_common::ConfigError;
use counsel_config::CounselConfig;

/// counsel: chat with a career counselor from the terminal.
#[derive(Parser, Debug)]
#[command(name = "counsel", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error) or a full
    /// filter directive.
    #[arg(long)]
    pub log_level: Option<String>,

    /// User whose sessions to open.
    #[arg(long)]
    pub user_id: Option<i64>,

    /// Chat service root URL.
    #[arg(long)]
    pub api_url: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}

impl Args {
    /// Apply command-line overrides on top of file and environment, then
    /// validate the result again.
    pub fn apply_to(&self, config: &mut CounselConfig) -> Result<(), ConfigError> {
        if let Some(user_id) = self.user_id {
            config.service.user_id = user_id;
        }
        if let Some(url) = &self.api_url {
            config.service.base_url = url.trim().trim_end_matches('/').to_string();
        }
        counsel_config::validation::validate(config)
    }

    /// Filter directive for the log subscriber, if any source sets one.
    pub fn log_directive(&self, config_level: Option<&str>) -> String {
        match self.log_level.as_deref().or(config_level) {
            Some(level) if level.contains('=') => level.to_string(),
            Some(level) => format!("counsel={level}"),
            None => "counsel=info".to_string(),
        }
    }
}

mod cli;
mod logging;
mod render;
mod repl;

use std::sync::Arc;
use std::time::Duration;

use counsel_chat::{ChatApi, HttpChatApi, HttpConfig, Orchestrator};
use counsel_common::UserId;
use counsel_config::schema::ServiceConfig;

fn http_config(service: &ServiceConfig) -> HttpConfig {
    HttpConfig::new(service.base_url.as_str())
        .with_connect_timeout(Duration::from_secs(u64::from(service.connect_timeout_secs)))
        .with_request_timeout(Duration::from_secs(u64::from(service.request_timeout_secs)))
}

#[tokio::main]
async fn main() {
    let args = cli::parse();

    let log = logging::init(&args.log_directive(None));
    tracing::info!("counsel v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Some(ref path) = args.config {
        tracing::info!("Using config override: {}", path.display());
    }
    let mut config = counsel_config::load_config(args.config.as_deref()).unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults and environment: {e}");
        counsel_config::fallback_config()
    });
    if args.log_level.is_none() {
        log.set_directive(&args.log_directive(Some(config.logging.level.as_filter())));
    }
    if let Err(e) = args.apply_to(&mut config) {
        tracing::error!("Invalid command-line override: {e}");
        std::process::exit(2);
    }
    tracing::info!(
        base_url = %config.service.base_url,
        user_id = config.service.user_id,
        page_size = config.chat.page_size,
        "Config loaded"
    );

    let api: Arc<dyn ChatApi> = match HttpChatApi::new(http_config(&config.service)) {
        Ok(api) => Arc::new(api),
        Err(e) => {
            tracing::error!("Failed to build HTTP client: {e}");
            std::process::exit(1);
        }
    };

    let orch = Orchestrator::new(
        api,
        UserId(config.service.user_id),
        config.chat.page_size,
    );

    if let Err(e) = repl::run(orch, config.chat.default_session_title).await {
        tracing::error!("Input error: {e}");
        std::process::exit(1);
    }
    tracing::info!("Shutdown complete");
}

//! Log subscriber setup.
//!
//! The subscriber comes up before the config file is read so the loader's
//! own messages are kept. Once the file is parsed its level is swapped in
//! through the reload handle.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter, Registry};

pub struct LogHandle(reload::Handle<EnvFilter, Registry>);

/// `RUST_LOG` plus one extra directive; an unparsable directive becomes `info`.
fn filter(directive: &str) -> EnvFilter {
    EnvFilter::from_default_env().add_directive(
        directive
            .parse()
            .unwrap_or_else(|_| LevelFilter::INFO.into()),
    )
}

pub fn init(directive: &str) -> LogHandle {
    let (filter, handle) = reload::Layer::new(filter(directive));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
    LogHandle(handle)
}

impl LogHandle {
    pub fn set_directive(&self, directive: &str) {
        if let Err(e) = self.0.reload(filter(directive)) {
            tracing::warn!("cannot change log level: {e}");
        }
    }
}

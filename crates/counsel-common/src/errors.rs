use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Failure talking to the remote chat service.
///
/// Failure bodies are never parsed; only the status code is kept.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("decode error: {0}")]
    Decode(String),
}

/// A failed chat operation, as surfaced to the user.
///
/// The `Display` text is the whole user-facing message; the transport
/// detail stays in the source for logging.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("Failed to fetch sessions")]
    SessionList(#[source] ApiError),

    #[error("Failed to create session")]
    SessionCreate(#[source] ApiError),

    #[error("Failed to fetch messages")]
    MessageList(#[source] ApiError),

    #[error("Failed to send message")]
    MessageSend(#[source] ApiError),
}

impl ChatError {
    pub fn api_error(&self) -> &ApiError {
        match self {
            Self::SessionList(e)
            | Self::SessionCreate(e)
            | Self::MessageList(e)
            | Self::MessageSend(e) => e,
        }
    }
}

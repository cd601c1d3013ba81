//! HTTP client struct, URL building and request bodies.

use counsel_common::{ApiError, SessionId, UserId};
use serde::Serialize;

use super::config::HttpConfig;

/// Chat service client.
pub struct HttpChatApi {
    pub(crate) config: HttpConfig,
    pub(crate) http: reqwest::Client,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateSessionBody<'a> {
    pub user_id: UserId,
    pub title: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SendMessageBody<'a> {
    pub text: &'a str,
    pub user_id: UserId,
    pub session_id: SessionId,
}

impl HttpChatApi {
    pub fn new(config: HttpConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ApiError::Network(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    pub(crate) fn sessions_url(&self, user_id: UserId) -> String {
        format!("{}/sessions/{user_id}", self.config.base_url)
    }

    pub(crate) fn create_session_url(&self) -> String {
        format!("{}/sessions", self.config.base_url)
    }

    pub(crate) fn messages_url(
        &self,
        user_id: UserId,
        session_id: SessionId,
        page: u32,
        limit: u32,
    ) -> String {
        format!(
            "{}/messages/{user_id}?sessionId={session_id}&page={page}&limit={limit}",
            self.config.base_url
        )
    }

    pub(crate) fn send_message_url(&self) -> String {
        format!("{}/messages", self.config.base_url)
    }
}

/// Reject any non-2xx response. The body is dropped unread.
pub(crate) fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status(status.as_u16()))
    }
}

/// Read the whole body and decode it as JSON.
pub(crate) async fn decode_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ApiError> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
}

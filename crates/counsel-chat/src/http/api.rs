//! ChatApi trait implementation for HttpChatApi.

use async_trait::async_trait;
use counsel_common::{ApiError, SessionId, UserId};
use tracing::debug;

use crate::{ChatApi, MessagePage, Session};

use super::client::{check_status, decode_json, CreateSessionBody, HttpChatApi, SendMessageBody};

fn network(e: reqwest::Error) -> ApiError {
    ApiError::Network(e.to_string())
}

#[async_trait]
impl ChatApi for HttpChatApi {
    async fn list_sessions(&self, user_id: UserId) -> Result<Vec<Session>, ApiError> {
        let url = self.sessions_url(user_id);
        debug!(%url, "GET sessions");

        let response = self.http.get(&url).send().await.map_err(network)?;
        decode_json(check_status(response)?).await
    }

    async fn create_session(&self, user_id: UserId, title: &str) -> Result<Session, ApiError> {
        let url = self.create_session_url();
        debug!(%url, "POST session");

        let response = self
            .http
            .post(&url)
            .json(&CreateSessionBody { user_id, title })
            .send()
            .await
            .map_err(network)?;
        decode_json(check_status(response)?).await
    }

    async fn list_messages(
        &self,
        user_id: UserId,
        session_id: SessionId,
        page: u32,
        limit: u32,
    ) -> Result<MessagePage, ApiError> {
        let url = self.messages_url(user_id, session_id, page, limit);
        debug!(%url, "GET messages");

        let response = self.http.get(&url).send().await.map_err(network)?;
        decode_json(check_status(response)?).await
    }

    async fn send_message(
        &self,
        user_id: UserId,
        session_id: SessionId,
        text: &str,
    ) -> Result<(), ApiError> {
        let url = self.send_message_url();
        debug!(%url, %session_id, "POST message");

        let response = self
            .http
            .post(&url)
            .json(&SendMessageBody {
                text,
                user_id,
                session_id,
            })
            .send()
            .await
            .map_err(network)?;
        check_status(response)?;
        Ok(())
    }
}

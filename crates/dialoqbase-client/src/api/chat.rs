//! Chat API.
//!
//! The chat endpoint has one result shape per request mode, selected by the
//! `stream` flag in the request body. [`ChatApi::send`] and
//! [`ChatApi::stream`] pin the flag and the matching result type, so callers
//! never branch on a loosely typed return value.

use serde::Serialize;

use crate::client::DialoqbaseClient;
use crate::error::Result;
use crate::stream::ChatStream;
use crate::types::{ChatRequest, ChatResponse};

/// Chat API client.
pub struct ChatApi {
    client: DialoqbaseClient,
}

/// Wire body for the chat endpoint: the caller's request plus the mode flag.
#[derive(Serialize)]
struct ChatRequestWire<'a> {
    #[serde(flatten)]
    request: &'a ChatRequest,
    stream: bool,
}

impl ChatApi {
    pub(crate) fn new(client: DialoqbaseClient) -> Self {
        Self { client }
    }

    /// Send a chat message and wait for the complete response.
    pub async fn send(&self, bot_id: &str, request: &ChatRequest) -> Result<ChatResponse> {
        tracing::debug!(bot_id, "dispatching buffered chat request");
        self.client
            .post(
                &format!("bot/{}/chat", bot_id),
                &ChatRequestWire {
                    request,
                    stream: false,
                },
            )
            .await
    }

    /// Send a chat message and stream the response.
    ///
    /// Returns as soon as response headers arrive; the [`ChatStream`] pulls
    /// the body lazily. See [`ChatStream`] for the message and termination
    /// contract.
    pub async fn stream(&self, bot_id: &str, request: &ChatRequest) -> Result<ChatStream> {
        tracing::debug!(bot_id, "dispatching streaming chat request");
        let response = self
            .client
            .post_stream(
                &format!("bot/{}/chat", bot_id),
                &ChatRequestWire {
                    request,
                    stream: true,
                },
            )
            .await?;
        Ok(ChatStream::new(response))
    }

    /// Send a message with just text (convenience method).
    pub async fn message(&self, bot_id: &str, text: impl Into<String>) -> Result<ChatResponse> {
        self.send(bot_id, &ChatRequest::new(text)).await
    }

    /// Stream a message with just text (convenience method).
    pub async fn stream_message(
        &self,
        bot_id: &str,
        text: impl Into<String>,
    ) -> Result<ChatStream> {
        self.stream(bot_id, &ChatRequest::new(text)).await
    }
}

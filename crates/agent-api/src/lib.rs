//! Typed Rust client for the console's AI agent API.
//!
//! Covers chat (plain, system-prompted, and SSE streaming), conversation
//! listing/deletion, and the service health probe. Unlike the servers API,
//! agent endpoints return their bodies directly with no envelope.

mod sse;
mod types;

pub use types::*;

use futures_util::StreamExt;
use futures_util::stream::BoxStream;

use crate::sse::SseBuffer;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("agent api request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("agent api {endpoint} returned {status}: {message}")]
    Api {
        endpoint: &'static str,
        status: reqwest::StatusCode,
        message: String,
        /// Parsed `{error, code, timestamp, path}` body, when the server sent one.
        body: Option<ErrorBody>,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

/// `data:` payloads of the streaming chat endpoint, in arrival order.
pub type ChatStream = BoxStream<'static, Result<String>>;

/// Client for the agent REST API.
#[derive(Clone)]
pub struct AgentClient {
    base_url: String,
    http: reqwest::Client,
}

impl AgentClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn check(resp: reqwest::Response, endpoint: &'static str) -> Result<reqwest::Response> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(normalize_error(endpoint, status, &body));
        }
        Ok(resp)
    }

    // ── Chat ─────────────────────────────────────────────────────────

    pub async fn send_message(&self, req: &ChatRequest) -> Result<AgentResponse> {
        let resp = self
            .http
            .post(self.url("/api/v1/agent/chat"))
            .json(req)
            .send()
            .await?;

        Self::check(resp, "send message")
            .await?
            .json()
            .await
            .map_err(Error::from)
    }

    pub async fn send_message_with_system_prompt(
        &self,
        req: &ChatRequest,
        system_prompt: &str,
    ) -> Result<AgentResponse> {
        let resp = self
            .http
            .post(self.url("/api/v1/agent/chat/system"))
            .query(&[("systemPrompt", system_prompt)])
            .json(req)
            .send()
            .await?;

        Self::check(resp, "send message with system prompt")
            .await?
            .json()
            .await
            .map_err(Error::from)
    }

    /// Open the SSE chat stream and yield each event's data payload.
    pub async fn stream_chat(
        &self,
        message: &str,
        conversation_id: Option<&str>,
        user_id: Option<&str>,
    ) -> Result<ChatStream> {
        let mut query: Vec<(&str, String)> = vec![("message", message.to_string())];
        if let Some(id) = conversation_id {
            query.push(("conversationId", id.to_string()));
        }
        if let Some(id) = user_id {
            query.push(("userId", id.to_string()));
        }

        let resp = self
            .http
            .get(self.url("/api/v1/agent/chat/stream"))
            .query(&query)
            .send()
            .await?;

        let resp = Self::check(resp, "stream chat").await?;

        struct State {
            body: BoxStream<'static, reqwest::Result<bytes::Bytes>>,
            buf: SseBuffer,
            done: bool,
        }

        let state = State {
            body: resp.bytes_stream().boxed(),
            buf: SseBuffer::default(),
            done: false,
        };

        let stream = futures_util::stream::unfold(state, |mut st| async move {
            loop {
                if let Some(data) = st.buf.next_event() {
                    return Some((Ok(data), st));
                }
                if st.done {
                    return None;
                }
                match st.body.next().await {
                    Some(Ok(chunk)) => st.buf.push(&chunk),
                    Some(Err(e)) => {
                        st.done = true;
                        return Some((Err(Error::from(e)), st));
                    }
                    None => {
                        st.done = true;
                        match st.buf.flush() {
                            Some(data) => return Some((Ok(data), st)),
                            None => return None,
                        }
                    }
                }
            }
        });

        Ok(stream.boxed())
    }

    // ── Conversations ────────────────────────────────────────────────

    pub async fn get_conversations(
        &self,
        user_id: Option<&str>,
        active_only: bool,
    ) -> Result<Vec<Conversation>> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(id) = user_id {
            query.push(("userId", id.to_string()));
        }
        query.push(("activeOnly", active_only.to_string()));

        let resp = self
            .http
            .get(self.url("/api/v1/agent/conversations"))
            .query(&query)
            .send()
            .await?;

        Self::check(resp, "get conversations")
            .await?
            .json()
            .await
            .map_err(Error::from)
    }

    pub async fn delete_conversation(
        &self,
        conversation_id: &str,
        user_id: Option<&str>,
    ) -> Result<()> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(id) = user_id {
            query.push(("userId", id.to_string()));
        }

        let resp = self
            .http
            .delete(self.url(&format!("/api/v1/agent/conversations/{conversation_id}")))
            .query(&query)
            .send()
            .await?;

        Self::check(resp, "delete conversation").await?;
        Ok(())
    }

    // ── Health ───────────────────────────────────────────────────────

    pub async fn get_health(&self) -> Result<AgentHealth> {
        let resp = self.http.get(self.url("/api/v1/agent/health")).send().await?;

        Self::check(resp, "get health")
            .await?
            .json()
            .await
            .map_err(Error::from)
    }
}

/// Normalize a non-2xx response into [`Error::Api`].
fn normalize_error(endpoint: &'static str, status: reqwest::StatusCode, body: &str) -> Error {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => Error::Api {
            endpoint,
            status,
            message: parsed.error.clone(),
            body: Some(parsed),
        },
        Err(_) => Error::Api {
            endpoint,
            status,
            message: format!("HTTP {status}"),
            body: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn missing_error_body_falls_back_to_status() {
        let err = normalize_error("get health", StatusCode::SERVICE_UNAVAILABLE, "not json");
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn agent_response_deserializes() {
        let raw = r#"{
            "content": "Hello! How can I help?",
            "conversationId": "conv-1",
            "timestamp": "2024-01-15T09:00:00Z",
            "isStreaming": false,
            "sources": [],
            "metadata": { "responseTime": "150ms", "toolsUsed": ["chat_assistant"], "model": "agent-v2" },
            "status": "SUCCESS"
        }"#;
        let resp: AgentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.status, ResponseStatus::Success);
        assert_eq!(resp.metadata.response_time.as_deref(), Some("150ms"));
        assert_eq!(resp.metadata.extra["model"], "agent-v2");
    }

    #[test]
    fn chat_request_omits_unset_fields() {
        let req = ChatRequest::new("hi");
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["message"], "hi");
        assert!(json.get("conversationId").is_none());
        assert!(json.get("systemPrompt").is_none());
    }
}

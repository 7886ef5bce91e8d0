//! Client for the `/chat` reply endpoint.
//!
//! One request per send: `POST {base_url}/chat` with a JSON body, one JSON
//! reply back. No retries, no timeout, no cancellation; a hung request
//! simply never resolves its invocation.

use std::fmt;

use async_trait::async_trait;
use log::{debug, warn};

use super::types::{ChatRequest, ChatResponse};

/// Errors from the reply request. Both surface to the user as the same
/// generic connection notice; the distinction exists for the log.
#[derive(Debug)]
pub enum ChatError {
    /// Network-level failure (DNS, refused connection, dropped transfer).
    Network(String),
    /// The body was not valid JSON.
    Parse(String),
}

impl fmt::Display for ChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatError::Network(msg) => write!(f, "network error: {msg}"),
            ChatError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ChatError {}

/// The seam between the send protocol and the transport. Production uses
/// [`HttpBackend`]; tests substitute scripted implementations.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Sends one outgoing message and returns the decoded reply payload.
    async fn send_message(&self, message: &str) -> Result<ChatResponse, ChatError>;
}

/// reqwest-backed client for the `/chat` endpoint.
pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn send_message(&self, message: &str) -> Result<ChatResponse, ChatError> {
        let response = self
            .client
            .post(format!("{}/chat", self.base_url))
            .json(&ChatRequest { message })
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        debug!("/chat response status: {}", response.status());

        // The server reports failures inside the JSON body; the status code
        // carries nothing extra, so the body is parsed either way.
        let body = response
            .text()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| {
            warn!("Unparseable /chat body: {e}");
            ChatError::Parse(e.to_string())
        })
    }
}

//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::{ChatBackend, ChatError, ChatResponse};

/// A backend that records outgoing messages and returns a canned reply,
/// so send-protocol tests need neither a server nor a socket.
pub struct ScriptedBackend {
    sent: Mutex<Vec<String>>,
    reply: Option<String>,
    fail: bool,
}

impl ScriptedBackend {
    /// Always answers with the given reply text.
    pub fn replying(text: &str) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            reply: Some(text.to_string()),
            fail: false,
        }
    }

    /// Answers successfully but with no usable reply.
    pub fn empty_reply() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            reply: None,
            fail: false,
        }
    }

    /// Fails every request at the transport level.
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            reply: None,
            fail: true,
        }
    }

    /// Messages sent so far, in order.
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatBackend for ScriptedBackend {
    async fn send_message(&self, message: &str) -> Result<ChatResponse, ChatError> {
        self.sent.lock().unwrap().push(message.to_string());
        if self.fail {
            return Err(ChatError::Network("scripted failure".to_string()));
        }
        Ok(ChatResponse {
            response: self.reply.clone(),
        })
    }
}

use serde::{Deserialize, Serialize};

/// Outbound body for `POST /chat`.
#[derive(Serialize, Debug)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
}

/// Reply payload from the server. A missing or empty `response` means the
/// server had no answer; extra fields (such as an `error` string) are
/// ignored.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ChatResponse {
    #[serde(default)]
    pub response: Option<String>,
}

impl ChatResponse {
    /// The usable reply text, if any. An empty string counts as no answer.
    pub fn text(&self) -> Option<&str> {
        self.response.as_deref().filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Contract test: the request serializes to exactly the wire shape the
    /// server expects.
    #[test]
    fn test_chat_request_serialization() {
        let req = ChatRequest { message: "hello" };
        let serialized = serde_json::to_string(&req).unwrap();
        assert_eq!(serialized, r#"{"message":"hello"}"#);
    }

    #[test]
    fn test_chat_response_with_text() {
        let resp: ChatResponse = serde_json::from_str(r#"{"response":"hi"}"#).unwrap();
        assert_eq!(resp.text(), Some("hi"));
    }

    #[test]
    fn test_chat_response_missing_field_means_no_answer() {
        let resp: ChatResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(resp.text(), None);
    }

    #[test]
    fn test_chat_response_empty_string_means_no_answer() {
        let resp: ChatResponse = serde_json::from_str(r#"{"response":""}"#).unwrap();
        assert_eq!(resp.text(), None);
    }

    #[test]
    fn test_chat_response_ignores_extra_fields() {
        let resp: ChatResponse =
            serde_json::from_str(r#"{"error":"quota exceeded","code":429}"#).unwrap();
        assert_eq!(resp.text(), None);
    }
}

//! Wire types shared by the chatbot route group and the chatbot client.
//!
//! Field names are camelCase on the wire to match the web frontend.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const FALLBACK_REPLY_EN: &str =
    "Sorry, an error occurred while processing your request. Please try again later.";
pub const FALLBACK_REPLY_VI: &str =
    "Xin lỗi, đã xảy ra lỗi khi xử lý yêu cầu của bạn. Vui lòng thử lại sau.";

/// Per-message description of the caller, session and UI state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatContext {
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub user: ContextUser,
    #[serde(default)]
    pub current_page: String,
    #[serde(default)]
    pub test_state: Option<Value>,
    #[serde(default)]
    pub latest_result_summary: Option<Value>,
}

/// Anonymous callers only carry `lang`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub reply: String,
    #[serde(default)]
    pub action: Option<Value>,
    #[serde(default)]
    pub quick_replies: Vec<String>,
    #[serde(default)]
    pub metadata: ChatMetadata,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatMetadata {
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChatResponse {
    /// Displayable apology turn used whenever a reply could not be produced.
    pub fn fallback(lang: Option<&str>, error: impl Into<String>) -> Self {
        let reply = match lang {
            Some("vi") => FALLBACK_REPLY_VI,
            _ => FALLBACK_REPLY_EN,
        };

        Self {
            reply: reply.to_string(),
            action: None,
            quick_replies: Vec::new(),
            metadata: ChatMetadata {
                confidence: 0.0,
                error: Some(error.into()),
            },
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.metadata.error.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub context: ChatContext,
}

/// Envelope returned by `POST /api/chatbot/chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatApiResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<ChatResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ChatApiResponse {
    pub fn ok(response: ChatResponse) -> Self {
        Self {
            success: true,
            response: Some(response),
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            response: None,
            message: Some(message.into()),
        }
    }
}

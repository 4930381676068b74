use reqwest::StatusCode;
use serde_json::{json, Value};
use thiserror::Error;

use crate::{
    config::Config,
    models::chat::{ChatApiResponse, ChatContext, ChatRequest, ChatResponse},
};

const DEFAULT_REJECTION: &str = "Failed to get chatbot response";

#[derive(Debug, Error)]
pub enum ChatClientError {
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("{0}")]
    Rejected(String),

    #[error("Invalid chatbot response: {0}")]
    Decode(String),
}

/// Sends chat messages to the chatbot endpoint.
///
/// One POST per message, no retry. Failures never reach the caller as
/// errors; they come back as a fallback turn carrying the error text.
#[derive(Clone)]
pub struct ChatbotClient {
    http: reqwest::Client,
    api_url: String,
}

impl ChatbotClient {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.chatbot_api_url.clone())
    }

    pub fn chat_url(&self) -> String {
        format!("{}/chat", self.api_url)
    }

    pub async fn send_message(&self, message: &str, context: &ChatContext) -> ChatResponse {
        match self.request(message, context).await {
            Ok(response) => response,
            Err(err) => {
                log::error!("Chatbot request failed: {}", err);
                ChatResponse::fallback(context.user.lang.as_deref(), err.to_string())
            }
        }
    }

    async fn request(
        &self,
        message: &str,
        context: &ChatContext,
    ) -> Result<ChatResponse, ChatClientError> {
        let body = ChatRequest {
            message: message.to_string(),
            context: context.clone(),
        };

        let response = self.http.post(self.chat_url()).json(&body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let error_body: Value = response.json().await.unwrap_or_else(|_| json!({}));
            return Err(api_error(status, &error_body));
        }

        let text = response.text().await?;
        let envelope: ChatApiResponse =
            serde_json::from_str(&text).map_err(|e| ChatClientError::Decode(e.to_string()))?;

        if !envelope.success {
            return Err(ChatClientError::Rejected(
                envelope
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_REJECTION.to_string()),
            ));
        }

        envelope
            .response
            .ok_or_else(|| ChatClientError::Decode("missing response".to_string()))
    }
}

fn api_error(status: StatusCode, body: &Value) -> ChatClientError {
    let message = body
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        });

    ChatClientError::Api {
        status: status.as_u16(),
        message,
    }
}

use std::sync::Arc;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
    models::chat::{ChatContext, ChatMetadata, ChatRequest, ChatResponse},
};

pub const MAX_MESSAGE_LENGTH: usize = 2000;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Produces the assistant's reply. Reply generation lives behind this seam.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatResponder: Send + Sync {
    async fn respond(&self, message: &str, context: &ChatContext) -> AppResult<ChatResponse>;
}

pub struct ChatbotService {
    responder: Arc<dyn ChatResponder>,
}

impl ChatbotService {
    pub fn new(responder: Arc<dyn ChatResponder>) -> Self {
        Self { responder }
    }

    /// Gemini when an API key is configured, the offline responder otherwise.
    pub fn from_config(config: &Config) -> Self {
        let responder: Arc<dyn ChatResponder> = match &config.gemini_api_key {
            Some(api_key) => Arc::new(GeminiResponder::new(
                api_key.clone(),
                config.gemini_model.clone(),
            )),
            None => {
                log::warn!("GEMINI_API_KEY not set; chatbot runs with the offline responder");
                Arc::new(OfflineResponder)
            }
        };
        Self::new(responder)
    }

    pub async fn reply(&self, request: ChatRequest) -> AppResult<ChatResponse> {
        let message = request.message.trim();
        if message.is_empty() {
            return Err(AppError::ValidationError("Message must not be empty".to_string()));
        }
        if message.chars().count() > MAX_MESSAGE_LENGTH {
            return Err(AppError::ValidationError(format!(
                "Message must be at most {} characters",
                MAX_MESSAGE_LENGTH
            )));
        }

        self.responder.respond(message, &request.context).await
    }
}

/// Calls the Gemini `generateContent` endpoint.
pub struct GeminiResponder {
    http: reqwest::Client,
    api_key: SecretString,
    model: String,
    base_url: String,
}

impl GeminiResponder {
    pub fn new(api_key: SecretString, model: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            model,
            base_url: GEMINI_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn prompt(message: &str, context: &ChatContext) -> String {
        let lang = context.user.lang.as_deref().unwrap_or("en");
        let page = if context.current_page.is_empty() {
            "Home"
        } else {
            context.current_page.as_str()
        };

        format!(
            "You are the assistant of a job aptitude quiz site. Answer in language '{}'. The user is on page '{}'.\n\nUser: {}",
            lang, page, message
        )
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

#[async_trait]
impl ChatResponder for GeminiResponder {
    async fn respond(&self, message: &str, context: &ChatContext) -> AppResult<ChatResponse> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": Self::prompt(message, context) }]
            }]
        });

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            log::error!("Gemini request failed with {}: {}", status, detail);
            return Err(AppError::UpstreamError(format!(
                "Generative backend returned {}",
                status
            )));
        }

        let payload: GenerateContentResponse = response.json().await?;
        let reply = payload
            .candidates
            .into_iter()
            .next()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| {
                AppError::UpstreamError("Generative backend returned no candidates".to_string())
            })?;

        Ok(ChatResponse {
            reply,
            action: None,
            quick_replies: Vec::new(),
            metadata: ChatMetadata {
                confidence: 0.9,
                error: None,
            },
        })
    }
}

/// Canned replies for deployments without a generative backend.
pub struct OfflineResponder;

#[async_trait]
impl ChatResponder for OfflineResponder {
    async fn respond(&self, _message: &str, context: &ChatContext) -> AppResult<ChatResponse> {
        let (reply, quick_replies) = match context.user.lang.as_deref() {
            Some("zh-TW") => (
                "目前助理為離線模式。您可以開始測驗或查看您的結果。",
                vec!["開始測驗", "查看結果"],
            ),
            _ => (
                "The assistant is running in offline mode. You can start a test or review your results.",
                vec!["Start a test", "View my results"],
            ),
        };

        Ok(ChatResponse {
            reply: reply.to_string(),
            action: None,
            quick_replies: quick_replies.into_iter().map(str::to_string).collect(),
            metadata: ChatMetadata {
                confidence: 0.5,
                error: None,
            },
        })
    }
}

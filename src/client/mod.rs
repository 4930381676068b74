//! Outbound side of the chatbot: builds the per-message context and sends
//! it to the chatbot endpoint.

pub mod chatbot;
pub mod context;

pub use chatbot::{ChatClientError, ChatbotClient};
pub use context::{build_context, SessionUser, DEFAULT_PAGE};

pub mod chatbot_service;
pub mod question_service;
pub mod session_service;
pub mod test_service;
pub mod user_service;

pub use chatbot_service::{ChatResponder, ChatbotService, GeminiResponder, OfflineResponder};
pub use question_service::QuestionService;
pub use session_service::SessionService;
pub use test_service::TestService;
pub use user_service::UserService;

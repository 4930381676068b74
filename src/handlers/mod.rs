pub mod auth_handler;
pub mod chatbot_handler;
pub mod question_handler;
pub mod system;
pub mod test_handler;
pub mod user_handler;

pub use system::{health, root};

pub mod question;
pub mod refresh_token;
pub mod test_result;
pub mod user;
pub use question::{Question, QuestionOption, QuestionType};
pub use refresh_token::RefreshToken;
pub use test_result::TestResult;
pub use user::User;

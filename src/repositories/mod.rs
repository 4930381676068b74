pub mod question_repository;
pub mod refresh_token_repository;
pub mod test_result_repository;
pub mod user_repository;

pub use question_repository::{MongoQuestionRepository, QuestionRepository};
pub use refresh_token_repository::{MongoRefreshTokenRepository, RefreshTokenRepository};
pub use test_result_repository::{MongoTestResultRepository, TestResultRepository};
pub use user_repository::{MongoUserRepository, UserRepository};

#[cfg(test)]
pub use question_repository::MockQuestionRepository;
#[cfg(test)]
pub use refresh_token_repository::MockRefreshTokenRepository;
#[cfg(test)]
pub use test_result_repository::MockTestResultRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;

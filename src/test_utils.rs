use crate::models::domain::{Question, QuestionOption, QuestionType, TestResult, User};

#[cfg(test)]
pub mod fixtures {
    use super::*;

    /// Creates a standard test user
    pub fn test_user() -> User {
        User::new("testuser", "test@example.com", "hash".to_string())
    }

    /// Creates a test user with custom username
    pub fn test_user_with_username(username: &str) -> User {
        User::new(username, &format!("{}@example.com", username), "hash".to_string())
    }

    pub fn test_question(category: &str, order: i32) -> Question {
        Question {
            id: format!("{}-{}", category, order),
            category: category.to_string(),
            title: format!("Question {}", order),
            question_type: QuestionType::Single,
            options: vec![
                QuestionOption {
                    id: "a".to_string(),
                    text: "Agree".to_string(),
                },
                QuestionOption {
                    id: "b".to_string(),
                    text: "Disagree".to_string(),
                },
            ],
            order,
        }
    }

    pub fn test_result(user_id: &str) -> TestResult {
        TestResult::new(user_id, "career", 7, 10)
    }
}

#[cfg(test)]
pub mod test_helpers {
    use std::sync::Arc;

    use actix_web::http::StatusCode;

    use crate::{
        app_state::{AppState, Repositories},
        db::{DatabaseHealth, MockDatabaseHealth},
        repositories::{
            MockQuestionRepository, MockRefreshTokenRepository, MockTestResultRepository,
            MockUserRepository,
        },
        services::{ChatbotService, OfflineResponder},
    };

    /// Repositories with no expectations; any call fails the test.
    pub fn mock_repositories() -> Repositories {
        Repositories {
            users: Arc::new(MockUserRepository::new()),
            refresh_tokens: Arc::new(MockRefreshTokenRepository::new()),
            questions: Arc::new(MockQuestionRepository::new()),
            test_results: Arc::new(MockTestResultRepository::new()),
        }
    }

    pub fn state_with(repositories: Repositories) -> AppState {
        AppState::from_parts(
            repositories,
            Arc::new(MockDatabaseHealth::new()),
            ChatbotService::new(Arc::new(OfflineResponder)),
        )
    }

    pub fn mock_state(db_health: Arc<dyn DatabaseHealth>) -> AppState {
        AppState::from_parts(
            mock_repositories(),
            db_health,
            ChatbotService::new(Arc::new(OfflineResponder)),
        )
    }

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_test_user() {
        let user = test_user();
        assert_eq!(user.username, "testuser");
        assert_eq!(user.email, "test@example.com");
    }

    #[test]
    fn test_fixtures_test_user_with_username() {
        let user = test_user_with_username("custom");
        assert_eq!(user.username, "custom");
        assert_eq!(user.email, "custom@example.com");
    }

    #[test]
    fn test_fixtures_test_question() {
        let question = test_question("career", 2);
        assert_eq!(question.id, "career-2");
        assert_eq!(question.options.len(), 2);
    }
}

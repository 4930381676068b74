use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{Question, QuestionOption, QuestionType, TestResult, User};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub username: String,
    pub display_name: String,
    pub email: String,
    pub lang: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        UserDto {
            id: user.id,
            username: user.username,
            display_name: user.display_name,
            email: user.email,
            lang: user.lang,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserDto,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDto {
    pub id: String,
    pub category: String,
    pub title: String,
    pub question_type: QuestionType,
    pub options: Vec<QuestionOption>,
    pub order: i32,
}

impl From<Question> for QuestionDto {
    fn from(question: Question) -> Self {
        QuestionDto {
            id: question.id,
            category: question.category,
            title: question.title,
            question_type: question.question_type,
            options: question.options,
            order: question.order,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResultDto {
    pub id: String,
    pub category: String,
    pub score: u32,
    pub total: u32,
    pub percentage: f64,
    pub answers: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub completed_at: DateTime<Utc>,
}

impl From<TestResult> for TestResultDto {
    fn from(result: TestResult) -> Self {
        let percentage = result.percentage();
        TestResultDto {
            id: result.id,
            category: result.category,
            score: result.score,
            total: result.total,
            percentage,
            answers: result.answers,
            summary: result.summary,
            completed_at: result.completed_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_dto_hides_password_hash() {
        let user = User::new("johndoe", "john@example.com", "$argon2id$secret".to_string());
        let value = serde_json::to_value(UserDto::from(user.clone())).unwrap();

        assert_eq!(value["id"], user.id);
        assert_eq!(value["displayName"], "johndoe");
        assert!(value.get("passwordHash").is_none());
        assert!(value.get("password_hash").is_none());
    }

    #[test]
    fn test_test_result_dto_includes_percentage() {
        let result = TestResult::new("user-1", "designer", 3, 4);
        let dto = TestResultDto::from(result);

        assert_eq!(dto.percentage, 75.0);
        assert_eq!(dto.category, "designer");
    }
}

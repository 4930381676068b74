use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::TestResult,
        dto::{request::CreateTestResultRequest, response::TestResultDto},
    },
    repositories::TestResultRepository,
};

pub struct TestService {
    repository: Arc<dyn TestResultRepository>,
}

impl TestService {
    pub fn new(repository: Arc<dyn TestResultRepository>) -> Self {
        Self { repository }
    }

    pub async fn save_result(
        &self,
        user_id: &str,
        request: CreateTestResultRequest,
    ) -> AppResult<TestResultDto> {
        request.validate()?;

        if request.score > request.total {
            return Err(AppError::ValidationError(format!(
                "score {} exceeds total {}",
                request.score, request.total
            )));
        }

        let mut result = TestResult::new(user_id, &request.category, request.score, request.total);
        result.answers = request.answers;
        result.summary = request.summary;

        let saved = self.repository.create(result).await?;
        Ok(saved.into())
    }

    pub async fn list_results(&self, user_id: &str) -> AppResult<Vec<TestResultDto>> {
        let results = self.repository.list_by_user(user_id).await?;
        Ok(results.into_iter().map(TestResultDto::from).collect())
    }

    /// Results owned by another user are reported as missing.
    pub async fn get_result(&self, user_id: &str, result_id: &str) -> AppResult<TestResultDto> {
        self.repository
            .find_by_id(result_id)
            .await?
            .filter(|result| result.user_id == user_id)
            .map(TestResultDto::from)
            .ok_or_else(|| AppError::NotFound(format!("Test result '{}' not found", result_id)))
    }
}

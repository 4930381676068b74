use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::dto::{request::QuestionQuery, response::QuestionDto},
    repositories::QuestionRepository,
};

pub struct QuestionService {
    repository: Arc<dyn QuestionRepository>,
}

impl QuestionService {
    pub fn new(repository: Arc<dyn QuestionRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_questions(&self, query: &QuestionQuery) -> AppResult<Vec<QuestionDto>> {
        let questions = self
            .repository
            .list(query.category().map(str::to_string), query.limit())
            .await?;
        Ok(questions.into_iter().map(QuestionDto::from).collect())
    }

    pub async fn get_question(&self, id: &str) -> AppResult<QuestionDto> {
        self.repository
            .find_by_id(id)
            .await?
            .map(QuestionDto::from)
            .ok_or_else(|| AppError::NotFound(format!("Question '{}' not found", id)))
    }
}

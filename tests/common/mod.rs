#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use job_quiz_server::{
    app_state::{AppState, Repositories},
    auth::SessionTokens,
    config::Config,
    db::DatabaseHealth,
    errors::{AppError, AppResult},
    models::domain::{Question, QuestionOption, QuestionType, RefreshToken, TestResult, User},
    repositories::{
        QuestionRepository, RefreshTokenRepository, TestResultRepository, UserRepository,
    },
    services::{ChatbotService, OfflineResponder},
};

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> AppResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.username == user.username) {
            return Err(AppError::AlreadyExists(format!(
                "Username '{}' is already taken",
                user.username
            )));
        }
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn update(&self, user: User) -> AppResult<User> {
        let mut users = self.users.write().await;
        if !users.contains_key(&user.id) {
            return Err(AppError::NotFound(format!(
                "User with id '{}' not found",
                user.id
            )));
        }
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryRefreshTokenRepository {
    tokens: RwLock<HashMap<String, RefreshToken>>,
}

impl InMemoryRefreshTokenRepository {
    pub async fn active_count(&self, user_id: &str) -> usize {
        self.tokens
            .read()
            .await
            .values()
            .filter(|t| t.user_id == user_id && t.is_active())
            .count()
    }
}

#[async_trait]
impl RefreshTokenRepository for InMemoryRefreshTokenRepository {
    async fn create(&self, token: RefreshToken) -> AppResult<RefreshToken> {
        let mut tokens = self.tokens.write().await;
        if tokens.contains_key(&token.token_hash) {
            return Err(AppError::AlreadyExists("Refresh token already stored".to_string()));
        }
        tokens.insert(token.token_hash.clone(), token.clone());
        Ok(token)
    }

    async fn find_by_token_hash(&self, hash: &str) -> AppResult<Option<RefreshToken>> {
        Ok(self.tokens.read().await.get(hash).cloned())
    }

    async fn revoke_by_token_hash(&self, hash: &str) -> AppResult<bool> {
        let mut tokens = self.tokens.write().await;
        let token = tokens
            .get_mut(hash)
            .ok_or_else(|| AppError::NotFound("Refresh token not found".to_string()))?;
        if token.is_revoked() {
            return Ok(false);
        }
        token.revoke(Utc::now());
        Ok(true)
    }

    async fn revoke_all_for_user(&self, user_id: &str) -> AppResult<u64> {
        let mut tokens = self.tokens.write().await;
        let now = Utc::now();
        let mut revoked = 0;
        for token in tokens
            .values_mut()
            .filter(|t| t.user_id == user_id && !t.is_revoked())
        {
            token.revoke(now);
            revoked += 1;
        }
        Ok(revoked)
    }

    async fn delete_expired(&self) -> AppResult<u64> {
        let mut tokens = self.tokens.write().await;
        let before = tokens.len();
        let now = Utc::now();
        tokens.retain(|_, t| t.expires_at >= now);
        Ok((before - tokens.len()) as u64)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryQuestionRepository {
    questions: RwLock<Vec<Question>>,
}

impl InMemoryQuestionRepository {
    pub fn with_questions(questions: Vec<Question>) -> Self {
        Self {
            questions: RwLock::new(questions),
        }
    }
}

#[async_trait]
impl QuestionRepository for InMemoryQuestionRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Question>> {
        let questions = self.questions.read().await;
        Ok(questions.iter().find(|q| q.id == id).cloned())
    }

    async fn list(&self, category: Option<String>, limit: i64) -> AppResult<Vec<Question>> {
        let questions = self.questions.read().await;
        let mut items: Vec<_> = questions
            .iter()
            .filter(|q| category.as_deref().map_or(true, |c| q.category == c))
            .cloned()
            .collect();
        items.sort_by_key(|q| q.order);
        items.truncate(limit.max(0) as usize);
        Ok(items)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryTestResultRepository {
    results: RwLock<Vec<TestResult>>,
}

impl InMemoryTestResultRepository {
    pub async fn len(&self) -> usize {
        self.results.read().await.len()
    }
}

#[async_trait]
impl TestResultRepository for InMemoryTestResultRepository {
    async fn create(&self, result: TestResult) -> AppResult<TestResult> {
        self.results.write().await.push(result.clone());
        Ok(result)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<TestResult>> {
        let results = self.results.read().await;
        Ok(results.iter().find(|r| r.id == id).cloned())
    }

    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<TestResult>> {
        let results = self.results.read().await;
        let mut items: Vec<_> = results
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        Ok(items)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Health check whose outcome the test controls.
pub struct StaticHealth {
    up: AtomicBool,
}

impl StaticHealth {
    pub fn new(up: bool) -> Self {
        Self {
            up: AtomicBool::new(up),
        }
    }

    pub fn set(&self, up: bool) {
        self.up.store(up, Ordering::SeqCst);
    }
}

#[async_trait]
impl DatabaseHealth for StaticHealth {
    async fn ping(&self) -> AppResult<()> {
        if self.up.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(AppError::DatabaseError("server selection timeout".to_string()))
        }
    }
}

pub fn question(id: &str, category: &str, order: i32) -> Question {
    Question {
        id: id.to_string(),
        category: category.to_string(),
        title: format!("Question {}", id),
        question_type: QuestionType::Scale,
        options: vec![QuestionOption {
            id: "1".to_string(),
            text: "Strongly agree".to_string(),
        }],
        order,
    }
}

/// A fully wired application state over in-memory storage.
pub struct TestHarness {
    pub state: AppState,
    pub tokens: SessionTokens,
    pub users: Arc<InMemoryUserRepository>,
    pub refresh_tokens: Arc<InMemoryRefreshTokenRepository>,
    pub test_results: Arc<InMemoryTestResultRepository>,
    pub health: Arc<StaticHealth>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_questions(vec![
            question("q1", "career", 1),
            question("q2", "career", 2),
            question("q3", "personality", 1),
        ])
    }

    pub fn with_questions(questions: Vec<Question>) -> Self {
        let config = Config::test_config();
        let tokens = SessionTokens::from_config(&config);

        let users = Arc::new(InMemoryUserRepository::default());
        let refresh_tokens = Arc::new(InMemoryRefreshTokenRepository::default());
        let test_results = Arc::new(InMemoryTestResultRepository::default());
        let health = Arc::new(StaticHealth::new(true));

        let repositories = Repositories {
            users: users.clone(),
            refresh_tokens: refresh_tokens.clone(),
            questions: Arc::new(InMemoryQuestionRepository::with_questions(questions)),
            test_results: test_results.clone(),
        };

        let state = AppState::from_parts(
            repositories,
            health.clone(),
            ChatbotService::new(Arc::new(OfflineResponder)),
        );

        Self {
            state,
            tokens,
            users,
            refresh_tokens,
            test_results,
            health,
        }
    }
}

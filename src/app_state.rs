use std::{sync::Arc, time::Instant};

use crate::{
    config::Config,
    db::{Database, DatabaseHealth},
    errors::AppResult,
    repositories::{
        MongoQuestionRepository, MongoRefreshTokenRepository, MongoTestResultRepository,
        MongoUserRepository, QuestionRepository, RefreshTokenRepository, TestResultRepository,
        UserRepository,
    },
    services::{
        chatbot_service::ChatbotService, question_service::QuestionService,
        session_service::SessionService, test_service::TestService, user_service::UserService,
    },
};

/// Storage backends the services are built on.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub refresh_tokens: Arc<dyn RefreshTokenRepository>,
    pub questions: Arc<dyn QuestionRepository>,
    pub test_results: Arc<dyn TestResultRepository>,
}

impl Repositories {
    pub fn mongo(db: &Database) -> Self {
        Self {
            users: Arc::new(MongoUserRepository::new(db)),
            refresh_tokens: Arc::new(MongoRefreshTokenRepository::new(db)),
            questions: Arc::new(MongoQuestionRepository::new(db)),
            test_results: Arc::new(MongoTestResultRepository::new(db)),
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        self.users.ensure_indexes().await?;
        self.refresh_tokens.ensure_indexes().await?;
        self.questions.ensure_indexes().await?;
        self.test_results.ensure_indexes().await?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct AppState {
    pub session_service: Arc<SessionService>,
    pub user_service: Arc<UserService>,
    pub test_service: Arc<TestService>,
    pub question_service: Arc<QuestionService>,
    pub chatbot_service: Arc<ChatbotService>,
    pub db_health: Arc<dyn DatabaseHealth>,
    pub started_at: Instant,
}

impl AppState {
    /// Connects to MongoDB and builds every service on top of it.
    pub async fn new(config: &Config) -> AppResult<Self> {
        let db = Database::connect(config).await?;

        let repositories = Repositories::mongo(&db);
        repositories.ensure_indexes().await?;

        let purged = repositories.refresh_tokens.delete_expired().await?;
        if purged > 0 {
            log::info!("Purged {} expired refresh tokens", purged);
        }

        let chatbot_service = ChatbotService::from_config(config);
        Ok(Self::from_parts(repositories, Arc::new(db), chatbot_service))
    }

    pub fn from_parts(
        repositories: Repositories,
        db_health: Arc<dyn DatabaseHealth>,
        chatbot_service: ChatbotService,
    ) -> Self {
        Self {
            session_service: Arc::new(SessionService::new(
                repositories.users.clone(),
                repositories.refresh_tokens.clone(),
            )),
            user_service: Arc::new(UserService::new(repositories.users.clone())),
            test_service: Arc::new(TestService::new(repositories.test_results.clone())),
            question_service: Arc::new(QuestionService::new(repositories.questions.clone())),
            chatbot_service: Arc::new(chatbot_service),
            db_health,
            started_at: Instant::now(),
        }
    }

    /// Seconds since the state was built.
    pub fn uptime_secs(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }
}

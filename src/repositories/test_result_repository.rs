use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::TestResult};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TestResultRepository: Send + Sync {
    async fn create(&self, result: TestResult) -> AppResult<TestResult>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<TestResult>>;
    /// Newest first.
    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<TestResult>>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoTestResultRepository {
    collection: Collection<TestResult>,
}

impl MongoTestResultRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("test_results");
        Self { collection }
    }
}

#[async_trait]
impl TestResultRepository for MongoTestResultRepository {
    async fn create(&self, result: TestResult) -> AppResult<TestResult> {
        self.collection.insert_one(&result).await?;
        Ok(result)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<TestResult>> {
        let result = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(result)
    }

    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<TestResult>> {
        let cursor = self
            .collection
            .find(doc! { "user_id": user_id })
            .sort(doc! { "completed_at": -1 })
            .await?;
        let results: Vec<TestResult> = cursor.try_collect().await?;
        Ok(results)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for test_results collection");

        let model = IndexModel::builder()
            .keys(doc! { "user_id": 1, "completed_at": -1 })
            .build();
        self.collection.create_index(model).await?;

        Ok(())
    }
}

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::Question};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Question>>;
    /// Questions ordered by `order`, optionally restricted to one category.
    async fn list(&self, category: Option<String>, limit: i64) -> AppResult<Vec<Question>>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoQuestionRepository {
    collection: Collection<Question>,
}

impl MongoQuestionRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("questions");
        Self { collection }
    }
}

#[async_trait]
impl QuestionRepository for MongoQuestionRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Question>> {
        let question = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(question)
    }

    async fn list(&self, category: Option<String>, limit: i64) -> AppResult<Vec<Question>> {
        let filter = match category {
            Some(category) => doc! { "category": category },
            None => doc! {},
        };

        let cursor = self
            .collection
            .find(filter)
            .sort(doc! { "order": 1 })
            .limit(limit)
            .await?;
        let questions: Vec<Question> = cursor.try_collect().await?;
        Ok(questions)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for questions collection");

        let model = IndexModel::builder()
            .keys(doc! { "category": 1, "order": 1 })
            .build();
        self.collection.create_index(model).await?;

        Ok(())
    }
}

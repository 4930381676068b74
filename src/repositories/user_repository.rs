use async_trait::async_trait;
use mongodb::{
    bson::doc,
    options::{IndexOptions, ReturnDocument},
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::User,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// A taken username is reported as `AlreadyExists` by the unique index.
    async fn create(&self, user: User) -> AppResult<User>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>>;
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;
    /// Replaces the stored user and returns it as persisted.
    async fn update(&self, user: User) -> AppResult<User>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.get_collection("users"),
        }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn create(&self, user: User) -> AppResult<User> {
        self.collection.insert_one(&user).await.map_err(|e| match AppError::from(e) {
            AppError::AlreadyExists(_) => {
                AppError::AlreadyExists(format!("Username '{}' is already taken", user.username))
            }
            other => other,
        })?;
        Ok(user)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self
            .collection
            .find_one(doc! { "username": username })
            .await?)
    }

    async fn update(&self, user: User) -> AppResult<User> {
        self.collection
            .find_one_and_replace(doc! { "_id": &user.id }, &user)
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User '{}' not found", user.id)))
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let username = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        let email = IndexModel::builder().keys(doc! { "email": 1 }).build();

        self.collection.create_indexes([username, email]).await?;
        log::info!("Ensured indexes on users");

        Ok(())
    }
}

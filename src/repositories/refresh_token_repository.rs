use async_trait::async_trait;
use mongodb::{
    bson::{doc, Bson, DateTime},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::RefreshToken,
};

/// Persistence for refresh-token fingerprints.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    async fn create(&self, token: RefreshToken) -> AppResult<RefreshToken>;
    async fn find_by_token_hash(&self, hash: &str) -> AppResult<Option<RefreshToken>>;
    /// Returns `true` only when this call moved the token from active to
    /// revoked. An already revoked token gives `false`; an unknown hash is
    /// `NotFound`.
    async fn revoke_by_token_hash(&self, hash: &str) -> AppResult<bool>;
    /// Returns how many active tokens were revoked.
    async fn revoke_all_for_user(&self, user_id: &str) -> AppResult<u64>;
    async fn delete_expired(&self) -> AppResult<u64>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoRefreshTokenRepository {
    collection: Collection<RefreshToken>,
}

impl MongoRefreshTokenRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("refresh_tokens");
        Self { collection }
    }
}

#[async_trait]
impl RefreshTokenRepository for MongoRefreshTokenRepository {
    async fn create(&self, token: RefreshToken) -> AppResult<RefreshToken> {
        self.collection.insert_one(&token).await?;
        Ok(token)
    }

    async fn find_by_token_hash(&self, hash: &str) -> AppResult<Option<RefreshToken>> {
        let token = self
            .collection
            .find_one(doc! { "token_hash": hash })
            .await?;
        Ok(token)
    }

    async fn revoke_by_token_hash(&self, hash: &str) -> AppResult<bool> {
        // The `revoked_at: null` filter makes the transition single-winner.
        let result = self
            .collection
            .update_one(
                doc! { "token_hash": hash, "revoked_at": Bson::Null },
                doc! { "$set": { "revoked_at": DateTime::now() } },
            )
            .await?;

        if result.modified_count == 1 {
            return Ok(true);
        }

        let known = self
            .collection
            .count_documents(doc! { "token_hash": hash })
            .await?;
        if known == 0 {
            return Err(AppError::NotFound("Refresh token not found".to_string()));
        }

        Ok(false)
    }

    async fn revoke_all_for_user(&self, user_id: &str) -> AppResult<u64> {
        let result = self
            .collection
            .update_many(
                doc! { "user_id": user_id, "revoked_at": Bson::Null },
                doc! { "$set": { "revoked_at": DateTime::now() } },
            )
            .await?;

        Ok(result.modified_count)
    }

    async fn delete_expired(&self) -> AppResult<u64> {
        let result = self
            .collection
            .delete_many(doc! { "expires_at": { "$lt": DateTime::now() } })
            .await?;

        Ok(result.deleted_count)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let models = vec![
            IndexModel::builder()
                .keys(doc! { "token_hash": 1 })
                .options(IndexOptions::builder().unique(true).build())
                .build(),
            IndexModel::builder()
                .keys(doc! { "user_id": 1, "revoked_at": 1 })
                .build(),
            IndexModel::builder().keys(doc! { "expires_at": 1 }).build(),
        ];

        self.collection.create_indexes(models).await?;
        log::info!("Ensured indexes on refresh_tokens");

        Ok(())
    }
}

use std::time::{Duration, Instant};

use async_trait::async_trait;
use mongodb::{
    bson::doc,
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client, Collection,
};

use crate::{config::Config, errors::AppResult};

const APP_NAME: &str = "job-quiz-server";
const SELECTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Connectivity check used by `GET /health`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DatabaseHealth: Send + Sync {
    async fn ping(&self) -> AppResult<()>;
}

/// Handle to the application database. Cloning shares the driver pool.
#[derive(Clone)]
pub struct Database {
    client: Client,
    db_name: String,
}

impl Database {
    /// Builds the client and refuses to return until one ping succeeds.
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let mut options = ClientOptions::parse(&config.mongo_conn_string).await?;
        options.app_name = Some(APP_NAME.to_string());
        options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());
        options.max_pool_size = Some(config.mongo_max_pool_size);
        options.min_pool_size = Some(config.mongo_max_pool_size.min(2));
        options.connect_timeout = Some(SELECTION_TIMEOUT);
        options.server_selection_timeout = Some(SELECTION_TIMEOUT);

        let database = Self {
            client: Client::with_options(options)?,
            db_name: config.mongo_db_name.clone(),
        };

        let started = Instant::now();
        database.ping().await?;
        log::info!(
            "Connected to MongoDB database '{}' in {} ms",
            database.db_name,
            started.elapsed().as_millis()
        );

        Ok(database)
    }

    pub fn get_collection<T>(&self, collection_name: &str) -> Collection<T>
    where
        T: Send + Sync,
    {
        self.client.database(&self.db_name).collection(collection_name)
    }
}

#[async_trait]
impl DatabaseHealth for Database {
    async fn ping(&self) -> AppResult<()> {
        self.client
            .database(&self.db_name)
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }
}

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::{ClientOptions, FindOneAndUpdateOptions, ReturnDocument},
    Client as MongoClient, Collection, Database,
};
use service_core::error::AppError;

use super::store::UserStore;
use crate::config::MongoConfig;
use crate::dtos::UpdateUserRequest;
use crate::models::User;

/// MongoDB-backed store. Cloning shares the driver's connection pool.
#[derive(Clone)]
pub struct MongoUserStore {
    client: MongoClient,
    db: Database,
    users: Collection<User>,
}

impl MongoUserStore {
    /// Builds the client and pings the server so an unreachable database
    /// fails startup instead of the first request.
    pub async fn connect(config: &MongoConfig) -> Result<Self, AppError> {
        tracing::info!(uri = %config.uri, "Connecting to MongoDB");

        let mut client_options = ClientOptions::parse(&config.uri).await.map_err(|e| {
            tracing::error!("Failed to parse MongoDB connection string: {}", e);
            AppError::from(e)
        })?;
        client_options.app_name = Some("user-service".to_string());

        let client = MongoClient::with_options(client_options).map_err(|e| {
            tracing::error!("Failed to create MongoDB client: {}", e);
            AppError::from(e)
        })?;
        let db = client.database(&config.database);
        let users = db.collection(&config.collection);

        let store = Self { client, db, users };
        store.health_check().await?;

        tracing::info!(
            database = %config.database,
            collection = %config.collection,
            "Successfully connected to MongoDB database"
        );
        Ok(store)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn list(&self) -> Result<Vec<User>, AppError> {
        let cursor = self.users.find(doc! {}, None).await?;
        let users: Vec<User> = cursor.try_collect().await?;
        Ok(users)
    }

    async fn insert(&self, user: User) -> Result<ObjectId, AppError> {
        let result = self.users.insert_one(&user, None).await?;
        result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::InternalError(anyhow::anyhow!(
                "MongoDB returned a non-ObjectId identifier: {}",
                result.inserted_id
            ))
        })
    }

    async fn update(
        &self,
        id: ObjectId,
        changes: &UpdateUserRequest,
    ) -> Result<Option<User>, AppError> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self
            .users
            .find_one_and_update(doc! { "_id": id }, changes.update_document(), options)
            .await?;
        Ok(updated)
    }

    async fn delete(&self, id: ObjectId) -> Result<Option<User>, AppError> {
        let deleted = self
            .users
            .find_one_and_delete(doc! { "_id": id }, None)
            .await?;
        Ok(deleted)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }
}

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;

use crate::dtos::UpdateUserRequest;
use crate::models::User;

/// Persistence seam for users. Each call is a single atomic store operation;
/// concurrent writes to the same id are last-write-wins.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Every stored user, unfiltered.
    async fn list(&self) -> Result<Vec<User>, AppError>;

    /// Persists `user` and returns the identifier the store assigned.
    async fn insert(&self, user: User) -> Result<ObjectId, AppError>;

    /// Applies `changes` and returns the updated record, or `None` if no user has `id`.
    async fn update(
        &self,
        id: ObjectId,
        changes: &UpdateUserRequest,
    ) -> Result<Option<User>, AppError>;

    /// Removes the user and returns it, or `None` if no user has `id`.
    async fn delete(&self, id: ObjectId) -> Result<Option<User>, AppError>;

    async fn health_check(&self) -> Result<(), AppError>;
}

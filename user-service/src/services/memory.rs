use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;
use std::collections::BTreeMap;
use std::sync::Mutex;

use super::store::UserStore;
use crate::dtos::UpdateUserRequest;
use crate::models::User;

/// Process-local store for tests and database-less runs.
///
/// Keyed by `ObjectId`, so listing follows creation order like a fresh collection.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: Mutex<BTreeMap<ObjectId, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<ObjectId, User>>, AppError> {
        self.users
            .lock()
            .map_err(|e| AppError::InternalError(anyhow::anyhow!("User store mutex poisoned: {}", e)))
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn list(&self) -> Result<Vec<User>, AppError> {
        Ok(self.lock()?.values().cloned().collect())
    }

    async fn insert(&self, mut user: User) -> Result<ObjectId, AppError> {
        let id = ObjectId::new();
        user.id = Some(id);
        self.lock()?.insert(id, user);
        Ok(id)
    }

    async fn update(
        &self,
        id: ObjectId,
        changes: &UpdateUserRequest,
    ) -> Result<Option<User>, AppError> {
        let mut users = self.lock()?;
        Ok(users.get_mut(&id).map(|user| {
            changes.apply_to(user);
            user.clone()
        }))
    }

    async fn delete(&self, id: ObjectId) -> Result<Option<User>, AppError> {
        Ok(self.lock()?.remove(&id))
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.lock().map(|_| ())
    }
}

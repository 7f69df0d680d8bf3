//! Request and response bodies of the `/api/v1/users` API.
//!
//! The wire format is camelCase JSON with identifiers rendered as 24-character
//! hex strings; the storage format lives in [`crate::models`].

use mongodb::bson::{doc, oid::ObjectId, Document};
use serde::{Deserialize, Serialize};
use service_core::error::AppError;

use crate::models::User;

/// Body of `POST /users`. An `id` supplied by the client is ignored and a
/// missing name is stored as an empty string.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl From<CreateUserRequest> for User {
    fn from(req: CreateUserRequest) -> Self {
        User::new(req.first_name, req.last_name)
    }
}

/// Body of `PUT /users/:id`. Only the fields present are written.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl UpdateUserRequest {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none()
    }

    /// The `$set` payload for this update, keyed by stored field names.
    pub fn set_document(&self) -> Document {
        let mut set = Document::new();
        if let Some(first_name) = &self.first_name {
            set.insert("firstName", first_name.as_str());
        }
        if let Some(last_name) = &self.last_name {
            set.insert("lastName", last_name.as_str());
        }
        set
    }

    pub fn update_document(&self) -> Document {
        doc! { "$set": self.set_document() }
    }

    pub fn apply_to(&self, user: &mut User) {
        if let Some(first_name) = &self.first_name {
            user.first_name = first_name.clone();
        }
        if let Some(last_name) = &self.last_name {
            user.last_name = last_name.clone();
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.map(|id| id.to_hex()).unwrap_or_default(),
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

/// Acknowledgment returned by `POST /users`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InsertUserResponse {
    pub inserted_id: String,
}

impl From<ObjectId> for InsertUserResponse {
    fn from(id: ObjectId) -> Self {
        Self {
            inserted_id: id.to_hex(),
        }
    }
}

pub const DELETED_MESSAGE: &str = "record deleted";

/// Parses a path identifier. Malformed ids never reach the store.
pub fn parse_user_id(raw: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw).map_err(|e| {
        AppError::BadRequest(anyhow::anyhow!("Invalid user id '{}': {}", raw, e))
    })
}

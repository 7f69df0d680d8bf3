use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

pub const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017";
pub const DEFAULT_MONGODB_DATABASE: &str = "sample";
pub const DEFAULT_MONGODB_COLLECTION: &str = "users";

#[derive(Debug, Clone, Deserialize)]
pub struct UserServiceConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub mongodb: MongoConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
    pub collection: String,
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            uri: DEFAULT_MONGODB_URI.to_string(),
            database: DEFAULT_MONGODB_DATABASE.to_string(),
            collection: DEFAULT_MONGODB_COLLECTION.to_string(),
        }
    }
}

impl MongoConfig {
    fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            uri: env::var("MONGODB_URI").unwrap_or(defaults.uri),
            database: env::var("MONGODB_DATABASE").unwrap_or(defaults.database),
            collection: env::var("MONGODB_COLLECTION").unwrap_or(defaults.collection),
        }
    }
}

impl UserServiceConfig {
    pub fn load() -> Result<Self, AppError> {
        // Handles .env and the APP__ prefix.
        let common = core_config::Config::load()?;

        Ok(UserServiceConfig {
            common,
            mongodb: MongoConfig::from_env(),
        })
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.common.port = port;
        self
    }
}

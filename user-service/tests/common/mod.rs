#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use futures::FutureExt;
use serde_json::Value;
use service_core::config::Config as CoreConfig;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tower::util::ServiceExt;
use user_service::config::{MongoConfig, UserServiceConfig};
use user_service::services::{InMemoryUserStore, MongoUserStore, UserStore};
use user_service::{build_router, AppState, Application};

/// Router wired to a fresh in-memory store.
pub fn in_memory_router() -> Router {
    router_with_store(Arc::new(InMemoryUserStore::new()))
}

pub fn router_with_store(store: Arc<dyn UserStore>) -> Router {
    build_router(AppState::new(store))
}

/// Sends one request through the router and decodes the JSON response body
/// (`Value::Null` when the body is empty or not JSON).
pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

/// Creates a user and returns its hex id.
pub async fn create_user(router: &Router, first_name: &str, last_name: &str) -> String {
    let body = serde_json::json!({ "firstName": first_name, "lastName": last_name }).to_string();
    let (status, json) = send(router, Method::POST, "/api/v1/users", Some(&body)).await;
    assert_eq!(status, StatusCode::CREATED);
    json["insertedId"]
        .as_str()
        .expect("insertedId should be a string")
        .to_string()
}

pub async fn list_users(router: &Router) -> Vec<Value> {
    let (status, json) = send(router, Method::GET, "/api/v1/users", None).await;
    assert_eq!(status, StatusCode::OK);
    json.as_array().expect("list should be an array").clone()
}

/// A live server backed by MongoDB, isolated in its own database.
#[derive(Clone)]
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub store: MongoUserStore,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let mongodb = MongoConfig {
            uri: std::env::var("TEST_MONGODB_URI")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            database: format!("user_service_test_{}", uuid::Uuid::new_v4()),
            collection: "users".to_string(),
        };

        let store = MongoUserStore::connect(&mongodb)
            .await
            .expect("Failed to connect to MongoDB");

        let config = UserServiceConfig {
            common: CoreConfig {
                port: 0, // Random port
                ..CoreConfig::default()
            },
            mongodb,
        };

        let app = Application::with_store(config, Arc::new(store.clone()))
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to accept connections
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            store,
        }
    }

    pub fn users_url(&self) -> String {
        format!("{}/api/v1/users", self.address)
    }

    /// Spawns an app, runs `test` against it and drops the test database
    /// whether or not `test` panicked.
    pub async fn run<F, Fut>(test: F)
    where
        F: FnOnce(TestApp) -> Fut,
        Fut: Future<Output = ()>,
    {
        let app = TestApp::spawn().await;
        let outcome = AssertUnwindSafe(test(app.clone())).catch_unwind().await;
        app.cleanup().await;

        if let Err(panic) = outcome {
            std::panic::resume_unwind(panic);
        }
    }

    /// Drops the per-test database.
    pub async fn cleanup(&self) {
        self.store
            .database()
            .drop(None)
            .await
            .expect("Failed to drop test database");
    }
}

//! End-to-end tests against a live MongoDB (`TEST_MONGODB_URI`, default
//! `mongodb://localhost:27017`). Run with `cargo test -- --ignored`.

mod common;

use common::TestApp;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

#[tokio::test]
#[ignore = "Requires MongoDB to be running"]
async fn crud_round_trip_against_mongodb() {
    TestApp::run(|app| async move {
        let client = Client::new();

        let users: Vec<Value> = client
            .get(app.users_url())
            .send()
            .await
            .expect("Failed to execute request")
            .json()
            .await
            .expect("Failed to parse JSON");
        assert!(users.is_empty());

        let response = client
            .post(app.users_url())
            .json(&json!({ "firstName": "Ada", "lastName": "Lovelace" }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::CREATED);
        let created: Value = response.json().await.expect("Failed to parse JSON");
        let id = created["insertedId"].as_str().unwrap().to_string();

        let response = client
            .put(format!("{}/{}", app.users_url(), id))
            .json(&json!({ "firstName": "X", "lastName": "Y" }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::OK);
        let updated: Value = response.json().await.expect("Failed to parse JSON");
        assert_eq!(updated["id"], id);
        assert_eq!(updated["firstName"], "X");

        let users: Vec<Value> = client
            .get(app.users_url())
            .send()
            .await
            .expect("Failed to execute request")
            .json()
            .await
            .expect("Failed to parse JSON");
        assert_eq!(users.len(), 1);
        assert_eq!(users[0]["lastName"], "Y");

        let response = client
            .delete(format!("{}/{}", app.users_url(), id))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.json::<String>().await.unwrap(), "record deleted");

        let response = client
            .delete(format!("{}/{}", app.users_url(), id))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    })
    .await;
}

#[tokio::test]
#[ignore = "Requires MongoDB to be running"]
async fn update_unknown_id_is_not_found_against_mongodb() {
    TestApp::run(|app| async move {
        let response = Client::new()
            .put(format!(
                "{}/{}",
                app.users_url(),
                mongodb::bson::oid::ObjectId::new().to_hex()
            ))
            .json(&json!({ "firstName": "X" }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    })
    .await;
}

#[tokio::test]
#[ignore = "Requires MongoDB to be running"]
async fn failing_test_still_drops_its_database() {
    let database = std::sync::Arc::new(std::sync::Mutex::new(None));
    let seen = database.clone();

    let outcome = tokio::spawn(TestApp::run(move |app| async move {
        *seen.lock().unwrap() = Some((app.store.clone(), app.store.database().name().to_string()));
        panic!("assertion failed inside test body");
    }))
    .await;
    assert!(outcome.is_err());

    let (store, name) = database.lock().unwrap().take().expect("test body should run");
    drop(store);
    let uri = std::env::var("TEST_MONGODB_URI")
        .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
    let remaining = mongodb::Client::with_uri_str(&uri)
        .await
        .expect("Failed to connect to MongoDB")
        .list_database_names(None, None)
        .await
        .expect("Failed to list databases");
    assert!(!remaining.contains(&name));
}

#![allow(dead_code)]

use std::sync::Arc;

use serde_json::json;
use tempfile::TempDir;
use wiremock::MockServer;

use plater_core::auth::AuthSession;
use plater_core::models::User;
use plater_core::{ApiClient, Config, SessionStore};

pub const TEST_SECRET: &str = "integration-test-secret";

pub fn test_config(server: &MockServer) -> Config {
    Config {
        base_url: server.uri(),
        token_ttl_mins: 30,
        last_username: None,
    }
}

pub fn open_store(dir: &TempDir) -> Arc<SessionStore> {
    Arc::new(
        SessionStore::open_with_secret(dir.path().to_path_buf(), TEST_SECRET)
            .expect("open session store"),
    )
}

/// Store pre-populated with a session for user "emilys".
pub fn seeded_store(dir: &TempDir, access: &str, refresh: Option<&str>) -> Arc<SessionStore> {
    let store = open_store(dir);
    let session = AuthSession {
        user: User {
            id: Some(1),
            username: Some("emilys".to_string()),
            ..User::default()
        },
        access_token: Some(access.to_string()),
        refresh_token: refresh.map(String::from),
    };
    store.save(&session).expect("seed session");
    store
}

pub fn api_client(server: &MockServer, store: Arc<SessionStore>) -> ApiClient {
    ApiClient::new(&test_config(server), store).expect("build api client")
}

/// One-recipe listing body in the backend's wire shape.
pub fn recipes_body() -> serde_json::Value {
    json!({
        "recipes": [{
            "id": 1,
            "name": "Classic Margherita Pizza",
            "cuisine": "Italian",
            "difficulty": "Easy",
            "mealType": ["Dinner"],
            "rating": 4.6
        }],
        "total": 1,
        "skip": 0,
        "limit": 30
    })
}

/// Login/profile payload for user "emilys", with token pair when requested.
pub fn user_body(with_tokens: bool) -> serde_json::Value {
    let mut body = json!({
        "id": 1,
        "username": "emilys",
        "email": "emily.johnson@x.dummyjson.com",
        "firstName": "Emily",
        "lastName": "Johnson",
        "gender": "female",
        "image": "https://dummyjson.com/icon/emilys/128"
    });
    if with_tokens {
        body["accessToken"] = json!("A1");
        body["refreshToken"] = json!("R1");
    }
    body
}

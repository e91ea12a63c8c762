mod support;

use std::sync::Arc;

use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use plater_core::models::Resource;
use plater_core::{RecipeRepository, UserRepository};

use support::{api_client, open_store, recipes_body, seeded_store, user_body, TEST_SECRET};

#[tokio::test]
async fn login_persists_session_durably() {
    let server = MockServer::start().await;
    // Login goes through the bare transport: no bearer header
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(500))
        .with_priority(1)
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_partial_json(json!({
            "username": "emilys",
            "password": "emilyspass"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_body(true)))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().expect("tempdir");
    let store = open_store(&dir);
    let client = api_client(&server, store.clone());

    let session = client.login("emilys", "emilyspass").await.expect("login");
    assert_eq!(session.user.first_name.as_deref(), Some("Emily"));
    assert_eq!(session.access_token.as_deref(), Some("A1"));
    assert!(client.is_authenticated());

    // Durable: a fresh store over the same directory sees the session
    let reopened = plater_core::SessionStore::open_with_secret(
        dir.path().to_path_buf(),
        TEST_SECRET,
    )
    .expect("reopen store");
    assert_eq!(reopened.session(), Some(session));
}

#[tokio::test]
async fn failed_login_does_not_create_a_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "Invalid credentials"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().expect("tempdir");
    let store = open_store(&dir);
    let client = api_client(&server, store.clone());

    client
        .login("emilys", "wrong")
        .await
        .expect_err("login should fail");
    assert!(store.session().is_none());
}

#[tokio::test]
async fn logout_clears_the_session() {
    let server = MockServer::start().await;
    let dir = TempDir::new().expect("tempdir");
    let store = seeded_store(&dir, "A1", Some("R1"));
    let client = api_client(&server, store.clone());

    client.logout().expect("logout");
    assert!(!client.is_authenticated());
    assert!(store.session().is_none());
}

#[tokio::test]
async fn fetch_current_user_maps_wire_profile() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_body(false)))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().expect("tempdir");
    let client = api_client(&server, seeded_store(&dir, "A1", Some("R1")));

    let user = client.fetch_current_user().await.expect("fetch user");
    assert_eq!(user.username.as_deref(), Some("emilys"));
    assert_eq!(user.display_name(), "Emily");
}

#[tokio::test]
async fn meal_type_filter_passes_sort_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/recipes/meal-type/dinner"))
        .and(query_param("sortBy", "rating"))
        .and(query_param("order", "desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(recipes_body()))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().expect("tempdir");
    let client = api_client(&server, seeded_store(&dir, "A1", Some("R1")));

    let recipes = client
        .fetch_recipes_by_meal_type("dinner", Some("rating"), Some("desc"))
        .await
        .expect("fetch by meal type");
    assert_eq!(recipes.len(), 1);
}

#[tokio::test]
async fn search_passes_query_parameter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/recipes/search"))
        .and(query_param("q", "pizza"))
        .respond_with(ResponseTemplate::new(200).set_body_json(recipes_body()))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().expect("tempdir");
    let client = api_client(&server, seeded_store(&dir, "A1", Some("R1")));

    let recipes = client.search_recipes("pizza").await.expect("search");
    assert_eq!(recipes[0].cuisine.as_deref(), Some("Italian"));
}

#[tokio::test]
async fn repository_wraps_success_in_resource() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/recipes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(recipes_body()))
        .mount(&server)
        .await;

    let dir = TempDir::new().expect("tempdir");
    let client = Arc::new(api_client(&server, seeded_store(&dir, "A1", Some("R1"))));
    let repo = RecipeRepository::new(client);

    let resource = repo.recipes(None, None).await;
    assert!(resource.is_success());
    assert_eq!(resource.data().map(|r| r.len()), Some(1));
}

#[tokio::test]
async fn repository_maps_forced_logout_to_relogin_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/recipes"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let dir = TempDir::new().expect("tempdir");
    let store = seeded_store(&dir, "A1", None);
    let client = Arc::new(api_client(&server, store.clone()));
    let repo = RecipeRepository::new(client);

    let resource = repo.recipes(None, None).await;
    match resource {
        Resource::Error { message, .. } => {
            assert_eq!(message, "Unauthorized. Please login again.")
        }
        other => panic!("expected error resource, got {other:?}"),
    }
    // Presentation layer observes the absent session and redirects to login
    assert!(store.session().is_none());
}

#[tokio::test]
async fn user_repository_login_reports_invalid_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "Invalid credentials"})),
        )
        .mount(&server)
        .await;

    let dir = TempDir::new().expect("tempdir");
    let client = Arc::new(api_client(&server, open_store(&dir)));
    let repo = UserRepository::new(client);

    let resource = repo.login("emilys", "wrong").await;
    assert!(matches!(
        resource,
        Resource::Error { ref message, .. } if message == "Invalid credentials"
    ));
}

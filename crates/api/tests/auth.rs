//! Registration, login and session lifecycle against a real database. Each
//! test skips itself when `TEST_DATABASE_URL` is not set.

mod common;

use api::gql::build_schema;
use async_graphql::Variables;
use common::*;
use tower_sessions::Session;

type TestSchema = async_graphql::Schema<
    api::gql::QueryRoot,
    api::gql::MutationRoot,
    async_graphql::EmptySubscription,
>;

async fn register(
    schema: &TestSchema,
    session: &Session,
    username: &str,
    password: &str,
) -> serde_json::Value {
    let mutation = r#"
        mutation Register($options: UsernamePasswordInput!) {
            register(options: $options) {
                errors { field message }
                user { id username }
            }
        }
    "#;

    let variables = Variables::from_json(serde_json::json!({
        "options": { "username": username, "password": password }
    }));

    let response =
        execute_graphql(schema, mutation, Some(variables), Some(session.clone())).await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);

    let mut data = response.data.into_json().unwrap();
    data["register"].take()
}

async fn login(
    schema: &TestSchema,
    session: &Session,
    username: &str,
    password: &str,
) -> serde_json::Value {
    let mutation = r#"
        mutation Login($options: UsernamePasswordInput!) {
            login(options: $options) {
                errors { field message }
                user { id username }
            }
        }
    "#;

    let variables = Variables::from_json(serde_json::json!({
        "options": { "username": username, "password": password }
    }));

    let response =
        execute_graphql(schema, mutation, Some(variables), Some(session.clone())).await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);

    let mut data = response.data.into_json().unwrap();
    data["login"].take()
}

async fn current_user(schema: &TestSchema, session: &Session) -> serde_json::Value {
    let query = r#"
        query {
            currentUser { id username }
        }
    "#;

    let response = execute_graphql(schema, query, None, Some(session.clone())).await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);

    let mut data = response.data.into_json().unwrap();
    data["currentUser"].take()
}

#[tokio::test]
async fn register_creates_user_and_logs_in() {
    let Some(state) = setup_test_db().await else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let schema = build_schema(state);
    let session = test_session();
    let username = unique_username("fresh");

    let payload = register(&schema, &session, &username, "secret").await;
    assert!(payload["errors"].is_null(), "{payload}");
    assert_eq!(payload["user"]["username"], username.as_str());

    // Registration implies login.
    let me = current_user(&schema, &session).await;
    assert_eq!(me["username"], username.as_str());
}

#[tokio::test]
async fn current_user_is_null_when_user_row_is_gone() {
    let Some(state) = setup_test_db().await else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let schema = build_schema(state.clone());
    let session = test_session();
    let username = unique_username("gone");

    let payload = register(&schema, &session, &username, "secret").await;
    assert!(payload["errors"].is_null(), "{payload}");
    let user_id = payload["user"]["id"].as_i64().unwrap() as i32;

    // The account disappears while the session stays established.
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(&state.db)
        .await
        .unwrap();

    let me = current_user(&schema, &session).await;
    assert!(me.is_null(), "stale session id must resolve to null, not an error");
}

#[tokio::test]
async fn duplicate_username_yields_field_error_and_single_record() {
    let Some(state) = setup_test_db().await else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let schema = build_schema(state.clone());
    let username = unique_username("dup");

    let first = register(&schema, &test_session(), &username, "secret").await;
    assert!(first["errors"].is_null(), "{first}");

    let second = register(&schema, &test_session(), &username, "secret").await;
    let errors = second["errors"].as_array().unwrap();
    assert_eq!(errors[0]["field"], "username");
    assert_eq!(errors[0]["message"], "Username has already been taken");
    assert!(second["user"].is_null());

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = $1")
        .bind(&username)
        .fetch_one(&state.db)
        .await
        .unwrap();
    assert_eq!(count, 1, "exactly one record must be persisted");
}

#[tokio::test]
async fn login_with_wrong_password_yields_field_error() {
    let Some(state) = setup_test_db().await else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let schema = build_schema(state);
    let username = unique_username("alice");

    register(&schema, &test_session(), &username, "correct").await;

    let session = test_session();
    let payload = login(&schema, &session, &username, "wrong").await;

    let errors = payload["errors"].as_array().unwrap();
    assert_eq!(errors[0]["field"], "password");
    assert_eq!(errors[0]["message"], "Invalid password");
    assert!(payload["user"].is_null());

    // Failed login must not touch session state.
    let me = current_user(&schema, &session).await;
    assert!(me.is_null());
}

#[tokio::test]
async fn login_with_unknown_username_yields_field_error() {
    let Some(state) = setup_test_db().await else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let schema = build_schema(state);

    let payload = login(&schema, &test_session(), &unique_username("ghost"), "x").await;

    let errors = payload["errors"].as_array().unwrap();
    assert_eq!(errors[0]["field"], "username");
    assert_eq!(errors[0]["message"], "Invalid username");
    assert!(payload["user"].is_null());
}

#[tokio::test]
async fn login_logout_round_trip() {
    let Some(state) = setup_test_db().await else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let schema = build_schema(state);
    let username = unique_username("bob");

    register(&schema, &test_session(), &username, "correct").await;

    let session = test_session();
    let payload = login(&schema, &session, &username, "correct").await;
    assert!(payload["errors"].is_null(), "{payload}");

    let me = current_user(&schema, &session).await;
    assert_eq!(me["username"], username.as_str());

    let response = execute_graphql(&schema, "mutation { logout }", None, Some(session.clone()))
        .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let data = response.data.into_json().unwrap();
    assert_eq!(data["logout"], true);

    let me = current_user(&schema, &session).await;
    assert!(me.is_null(), "logout must return the session to anonymous");
}

#[tokio::test]
async fn users_query_never_exposes_password() {
    let Some(state) = setup_test_db().await else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let schema = build_schema(state);
    let username = unique_username("carol");

    register(&schema, &test_session(), &username, "secret").await;

    // The schema has no password field at all; asking for it is a query error.
    let response = execute_graphql(&schema, "query { users { id username password } }", None, None)
        .await;
    assert!(!response.errors.is_empty());

    let response = execute_graphql(&schema, "query { users { id username } }", None, None).await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let data = response.data.into_json().unwrap();
    assert!(data["users"]
        .as_array()
        .unwrap()
        .iter()
        .any(|u| u["username"] == username.as_str()));
}

//! Schema-level tests that exercise the validation and session paths which
//! return before any database round trip; they run without Postgres.

mod common;

use api::gql::build_schema;
use async_graphql::Variables;
use common::*;

#[tokio::test]
async fn register_rejects_short_username() {
    let schema = build_schema(lazy_state());

    let mutation = r#"
        mutation {
            register(options: { username: "ab", password: "secret" }) {
                errors { field message }
                user { id username }
            }
        }
    "#;

    let response = execute_graphql(&schema, mutation, None, Some(test_session())).await;

    assert!(
        response.errors.is_empty(),
        "Validation failures must be payload data: {:?}",
        response.errors
    );

    let data = response.data.into_json().unwrap();
    let errors = data["register"]["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["field"], "username");
    assert_eq!(
        errors[0]["message"],
        "Username must be at least 3 characters long"
    );
    assert!(data["register"]["user"].is_null());
}

#[tokio::test]
async fn register_rejects_short_password() {
    let schema = build_schema(lazy_state());

    let mutation = r#"
        mutation Register($options: UsernamePasswordInput!) {
            register(options: $options) {
                errors { field message }
                user { id }
            }
        }
    "#;

    let variables = Variables::from_json(serde_json::json!({
        "options": { "username": "alice", "password": "xy" }
    }));

    let response = execute_graphql(&schema, mutation, Some(variables), Some(test_session())).await;

    assert!(response.errors.is_empty(), "{:?}", response.errors);

    let data = response.data.into_json().unwrap();
    let errors = data["register"]["errors"].as_array().unwrap();
    assert_eq!(errors[0]["field"], "password");
    assert_eq!(
        errors[0]["message"],
        "Password must be at least 3 characters long"
    );
    assert!(data["register"]["user"].is_null());
}

#[tokio::test]
async fn current_user_is_null_for_anonymous_session() {
    let schema = build_schema(lazy_state());

    let query = r#"
        query {
            currentUser { id username }
        }
    "#;

    let response = execute_graphql(&schema, query, None, Some(test_session())).await;

    assert!(response.errors.is_empty(), "{:?}", response.errors);

    let data = response.data.into_json().unwrap();
    assert!(data["currentUser"].is_null());
}

#[tokio::test]
async fn logout_of_fresh_session_resolves_true() {
    let schema = build_schema(lazy_state());

    let mutation = r#"
        mutation {
            logout
        }
    "#;

    let response = execute_graphql(&schema, mutation, None, Some(test_session())).await;

    assert!(response.errors.is_empty(), "{:?}", response.errors);

    let data = response.data.into_json().unwrap();
    assert_eq!(data["logout"], true);
}
